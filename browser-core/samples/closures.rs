fn apply<F: Fn(i32) -> i32>(f: F, value: i32) -> i32 {
    f(value)
}

fn make_adder(n: i32) -> impl Fn(i32) -> i32 {
    move |x| x + n
}

fn main() {
    let factor = 3;
    let triple = |x| x * factor;
    println!("{}", apply(triple, 7));

    let add_five = make_adder(5);
    println!("{}", add_five(10));

    let mut calls = 0;
    let mut counter = || calls += 1;
    counter();
    counter();
    println!("called {calls} times");
}
