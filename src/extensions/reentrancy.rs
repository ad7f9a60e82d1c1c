use tracing::debug;

use crate::env::{CallContext, Env};
use crate::extensions::env_extensions::EnvExtensions;
use crate::types::error::Result;
use crate::types::interfaces::IReentrancyGuard::ReentrancyGuardReentrantCall;

// Runs `body` holding the diamond-wide reentrancy lock
//
// # Arguments
//
// * `e` - The environment
// * `ctx` - Frame of the guarded entry point, its storage holds the lock
// * `body` - Guarded logic
//
// # Errors
//
// Fails with `ReentrancyGuardReentrantCall` when the lock is already held. A failing body
// leaves the lock as it found it because the whole frame is rolled back.
pub fn non_reentrant<T>(
    e: &mut Env,
    ctx: &CallContext,
    body: impl FnOnce(&mut Env) -> Result<T>,
) -> Result<T> {
    if e.is_entered(ctx.address) {
        debug!(diamond = %ctx.address, caller = %ctx.caller, "reentrant call rejected");
        return Err(ReentrancyGuardReentrantCall {}.into());
    }
    e.set_entered(ctx.address, true);
    let result = body(e)?;
    e.set_entered(ctx.address, false);
    Ok(result)
}
