//! Interface tests for wrappers and the method interceptor using Cucumber.
//!
//! These tests describe the observable call contract: return values,
//! propagated errors, and the exact lines written to each stream.
//!
//! ```bash
//! cargo test --test interfaces --features test-utils
//! ```

mod steps;

use cucumber::World;
use steps::interceptor::InterceptorWorld;
use steps::wrapper_contract::WrapperWorld;

#[tokio::main]
async fn main() {
    println!("\n=== Running Wrapper Contract Interface Tests ===\n");
    WrapperWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/wrapper_contract.feature")
        .await;

    println!("\n=== Running Interceptor Interface Tests ===\n");
    InterceptorWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/interceptor.feature")
        .await;
}
