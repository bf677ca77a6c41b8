use log::debug;
use std::thread;
use std::time::Duration;

/// Pause between two listing requests
pub const REQUEST_DELAY: Duration = Duration::from_millis(600);

pub fn request_delay(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    debug!("Waiting {} ms before next request", delay.as_millis());
    thread::sleep(delay);
}
