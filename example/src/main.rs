use std::time::Instant;

use equix::{Error, RuntimeOption, Solutions};

const NONCE_RANGE: u64 = 64;

fn main() -> Result<(), Error> {
    println!("scanning {NONCE_RANGE} nonces");

    let builder = equix::EquiXBuilder::new();
    let mut memory = equix::SolverMemory::new();
    let mut total_solutions = 0usize;

    let work_timer = Instant::now();
    for nonce in 0..NONCE_RANGE {
        let challenge = nonce.to_le_bytes();
        let ctx = builder.build(&challenge)?;
        let solutions = ctx.solve_with_memory(&mut memory);
        verify_all(&challenge, &solutions)?;
        total_solutions += solutions.len();
    }
    let elapsed = work_timer.elapsed();

    println!("found {total_solutions} solutions across {NONCE_RANGE} nonces");
    println!(
        "{:.1} solutions/nonce, {:?} total, {:?}/nonce",
        total_solutions as f64 / NONCE_RANGE as f64,
        elapsed,
        elapsed / NONCE_RANGE as u32,
    );

    match equix::EquiXBuilder::new()
        .runtime(RuntimeOption::TryCompile)
        .build(&[0u8; 4])
    {
        Err(Error::Unsupported) => println!("compiled backend: unsupported (as expected)"),
        Err(e) => println!("compiled backend: unexpected error {e}"),
        Ok(_) => println!("compiled backend: unexpectedly succeeded"),
    }

    Ok(())
}

fn verify_all(challenge: &[u8; 8], solutions: &Solutions) -> Result<(), Error> {
    for solution in solutions.iter() {
        equix::verify(challenge, *solution)?;
    }
    Ok(())
}
