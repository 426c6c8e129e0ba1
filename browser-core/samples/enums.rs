enum Shape {
    Circle { radius: f64 },
    Rect { w: f64, h: f64 },
    Point,
}

impl Shape {
    fn area(&self) -> f64 {
        match self {
            Shape::Circle { radius } => std::f64::consts::PI * radius * radius,
            Shape::Rect { w, h } => w * h,
            Shape::Point => 0.0,
        }
    }
}

fn main() {
    let shapes = [
        Shape::Circle { radius: 1.0 },
        Shape::Rect { w: 2.0, h: 3.0 },
        Shape::Point,
    ];
    for shape in &shapes {
        println!("area = {:.2}", shape.area());
    }

    let maybe: Option<u8> = Some(3);
    if let Some(n) = maybe {
        println!("got {n}");
    }
}
