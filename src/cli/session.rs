use super::common::{print_info, print_success, print_warning, CliContext};
use crate::session::{clear_session, load_session, token_preview};
use anyhow::Result;
use tracing::info;

pub fn cmd_session() -> Result<()> {
    let ctx = CliContext::load()?;
    let Some(session) = load_session(ctx.store.as_ref())? else {
        print_info("Not signed in. Run `bidmart` to sign in with your phone number.");
        return Ok(());
    };

    print_success("Signed in");
    println!("  ID token:      {}", token_preview(&session.id_token));
    println!("  Access token:  {}", token_preview(&session.access_token));
    println!("  Refresh token: {}", token_preview(&session.refresh_token));
    match session.user_id() {
        Some(user_id) => println!("  User:          {}", user_id),
        None => print_warning("The ID token has no user id; listings cannot be posted"),
    }
    Ok(())
}

pub fn cmd_logout() -> Result<()> {
    let ctx = CliContext::load()?;
    if load_session(ctx.store.as_ref())?.is_none() {
        print_info("No session stored");
        return Ok(());
    }

    clear_session(ctx.store.as_ref())?;
    info!("CLI: session cleared");
    print_success("Signed out");
    Ok(())
}
