// build.rs

use chrono::Utc;

fn main() {
    // Stamp the binary with the moment it was built, the demo logs it at start-up
    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    println!("cargo:rustc-env=DYNACLOCK_BUILD_DATE={}", build_date);

    // Only re-run when build.rs itself changes
    println!("cargo:rerun-if-changed=build.rs");
}
