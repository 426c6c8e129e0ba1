use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() {
    let (tx, rx) = mpsc::channel();

    let handles: Vec<_> = (0..3)
        .map(|id| {
            let tx = tx.clone();
            thread::spawn(move || {
                for i in 0..3 {
                    tx.send(format!("worker {id}: message {i}")).ok();
                    thread::sleep(Duration::from_millis(10));
                }
            })
        })
        .collect();
    drop(tx);

    for msg in rx {
        println!("{msg}");
    }
    for handle in handles {
        handle.join().ok();
    }
}
