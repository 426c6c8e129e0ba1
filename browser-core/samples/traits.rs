use std::fmt::Display;

trait Summary {
    fn author(&self) -> String;

    fn summarize(&self) -> String {
        format!("(Read more from {}...)", self.author())
    }
}

struct Post {
    user: String,
    body: String,
}

impl Summary for Post {
    fn author(&self) -> String {
        format!("@{}", self.user)
    }
}

fn notify(item: &impl Summary) {
    println!("Breaking news! {}", item.summarize());
}

fn largest<T: PartialOrd + Display + Copy>(items: &[T]) -> T {
    let mut largest = items[0];
    for &item in items {
        if item > largest {
            largest = item;
        }
    }
    largest
}

fn main() {
    let post = Post {
        user: "rustacean".to_string(),
        body: "traits are great".to_string(),
    };
    notify(&post);
    println!("{}", post.body);
    println!("largest = {}", largest(&[3, 9, 4]));
}
