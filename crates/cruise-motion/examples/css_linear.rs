//! Builds the three cruise-back variants for a rolling-ball style motion
//! and prints the duration / `linear()` pair a playback layer would consume.

use cruise_motion::{cruise_in_back, cruise_in_out_back, cruise_out_back, MotionParams};

fn main() -> Result<(), cruise_motion::MotionError> {
    // 100px of travel at 300px/s with a 50px bounce past the target.
    let params = MotionParams::new(300.0, 100.0, 50.0);

    let out = cruise_out_back(params)?;
    let inn = cruise_in_back(params)?;
    let in_out = cruise_in_out_back(params)?;

    println!("out     {:.4}s  {}", out.duration, out.encoding);
    println!("in      {:.4}s  {}", inn.duration, inn.encoding);
    println!("in-out  {:.4}s  {}", in_out.duration, in_out.encoding);

    Ok(())
}
