use fractal_core::FractalEngine;

fn main() {
    // Generate a 17×17 fractal with seed 2025, amplitude 1.0
    let mut engine = match FractalEngine::with_seed(17, 1.0, 2025) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };
    engine.generate();

    // Print the raw grid, then the normalized top-left 8×8 corner
    print!("{}", engine.dump());
    println!();
    if let Ok(percent) = engine.percentage_heights() {
        for y in 0..8 {
            for x in 0..8 {
                print!("{:>6.3} ", percent[y * 17 + x]);
            }
            println!();
        }
    }
}
