use std::sync::{Arc, Mutex};
use std::thread;

fn main() {
    let counter = Arc::new(Mutex::new(0));
    let mut handles = Vec::new();

    for _ in 0..10 {
        let counter = Arc::clone(&counter);
        handles.push(thread::spawn(move || {
            if let Ok(mut n) = counter.lock() {
                *n += 1;
            }
        }));
    }

    for handle in handles {
        handle.join().ok();
    }

    println!("Result: {}", *counter.lock().unwrap());
}
