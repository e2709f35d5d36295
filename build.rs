use std::env;

fn main() {
    let target = env::var("TARGET").unwrap();

    if target.contains("avr") {
        // Configure for ATmega128
        println!("cargo:rustc-link-arg=-mmcu=atmega128");

        // Pass CPU frequency for timing calculations
        println!("cargo:rustc-env=MCU_FREQ_HZ=16000000");
    }

    // Debug vs Release configurations
    if env::var("PROFILE").unwrap() == "debug" {
        println!("cargo:rustc-cfg=feature=\"debug\"");
    }

    // Check if we're building the hardware-in-loop test runners
    if env::var("CARGO_FEATURE_HIL_TESTS").is_ok() {
        println!("cargo:warning=Building hardware-in-loop runners from demos/");
    }
}
