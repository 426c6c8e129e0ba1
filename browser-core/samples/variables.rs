const MAX_POINTS: u32 = 100_000;

fn main() {
    let x = 5;
    println!("x = {x}");

    // shadowing creates a new binding
    let x = x * 2;
    println!("shadowed x = {x}");

    let mut count = 0;
    count += 1;
    println!("count = {count}, max = {MAX_POINTS}");

    let spaces = "   ";
    let spaces = spaces.len();
    println!("spaces = {spaces}");
}
