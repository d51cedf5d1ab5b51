//! Prints how much mobile data each polling schedule of the widget uses.
//!
//! Usage: `usage-report [remaining_mb]` (defaults to 999).

use data_balance::usage::{bytes_to_mb, share_of_balance, TrafficProfile, SCENARIOS};

const DEFAULT_REMAINING_MB: f64 = 999.0;

fn main() {
    let remaining_mb = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<f64>().ok())
        .filter(|mb| *mb > 0.0)
        .unwrap_or(DEFAULT_REMAINING_MB);
    let profile = TrafficProfile::measured();

    println!("Data balance API traffic");
    println!("{}", "=".repeat(40));
    println!("request headers : {:>6} bytes", profile.request_header_bytes);
    println!("response headers: {:>6} bytes", profile.response_header_bytes);
    println!("response body   : {:>6} bytes", profile.response_body_bytes);
    println!("TLS handshake   : {:>6} bytes (first request only)", profile.tls_handshake_bytes);
    println!("{}", "-".repeat(40));
    println!(
        "first request   : {:>6} bytes ({:.2} KB)",
        profile.first_request_bytes(),
        profile.first_request_bytes() as f64 / 1024.0
    );
    println!(
        "later requests  : {:>6} bytes ({:.2} KB)",
        profile.subsequent_request_bytes(),
        profile.subsequent_request_bytes() as f64 / 1024.0
    );

    println!();
    println!("Monthly usage by schedule");
    println!("{}", "-".repeat(40));
    for scenario in SCENARIOS {
        let bytes = profile.monthly_bytes(scenario.monthly_calls);
        println!(
            "{:>8}: {:>4} calls = {:>9} bytes ({:>6.1} KB / {:>4.2} MB)",
            scenario.name,
            scenario.monthly_calls,
            bytes,
            bytes as f64 / 1024.0,
            bytes_to_mb(bytes)
        );
        println!("          {}", scenario.description);
    }

    println!();
    println!("Remaining balance: {} MB", remaining_mb);
    for calls in [90, 720] {
        println!(
            "{:>4} calls/month use {:.3} MB ({:.4}% of the balance)",
            calls,
            bytes_to_mb(calls * profile.subsequent_request_bytes()),
            share_of_balance(&profile, calls, remaining_mb)
        );
    }
}
