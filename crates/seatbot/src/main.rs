use std::sync::Arc;

use seatbot_core::{
    config::Config,
    messaging::port::ReplyPort,
    roster::{HttpRosterSource, RosterLookup},
};
use seatbot_line::LineMessenger;

#[tokio::main]
async fn main() -> Result<(), seatbot_core::Error> {
    seatbot_core::logging::init("seatbot")?;

    let cfg = Arc::new(Config::load()?);

    let source = HttpRosterSource::new(cfg.roster_csv_url.clone(), cfg.roster_fetch_timeout)?;
    let lookup = Arc::new(RosterLookup::new(Arc::new(source)));

    let messenger: Arc<dyn ReplyPort> = Arc::new(LineMessenger::new(
        cfg.line_api_base.clone(),
        cfg.line_channel_access_token.clone(),
    )?);

    seatbot_line::router::run_server(cfg, lookup, messenger)
        .await
        .map_err(|e| seatbot_core::Error::External(format!("webhook server failed: {e}")))?;

    Ok(())
}
