fn main() {
    let numbers = vec![1, 2, 3, 4, 5, 6];

    let evens_squared: Vec<i32> = numbers
        .iter()
        .filter(|n| *n % 2 == 0)
        .map(|n| n * n)
        .collect();
    println!("{evens_squared:?}");

    let total: i32 = numbers.iter().sum();
    println!("sum = {total}");

    let words = ["alpha", "beta", "gamma"];
    for (i, word) in words.iter().enumerate() {
        println!("{i}: {word}");
    }

    let fib: Vec<u64> = std::iter::successors(Some((0u64, 1u64)), |&(a, b)| Some((b, a + b)))
        .map(|(a, _)| a)
        .take(10)
        .collect();
    println!("{fib:?}");
}
