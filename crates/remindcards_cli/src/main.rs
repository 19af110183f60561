//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `remindcards_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("remindcards_core ping={}", remindcards_core::ping());
    println!("remindcards_core version={}", remindcards_core::core_version());
}
