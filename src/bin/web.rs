//! Single binary web server: HTML shell from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. See `ff_tournament_web::config` for the
//! environment variables (HOST, PORT, DATA_FILE, ADMIN_UIDS, SESSION_KEY, AUTH_SECRET, ...).

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use chrono::Utc;
use ff_tournament_web::notify::{deliver, LogNotifier, Notifier};
use ff_tournament_web::web::{configure, session_key, session_middleware, Settings};
use ff_tournament_web::{
    collect_due_reminders, expire_undo, persist, ArenaStore, Config, TokenVerifier,
};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// How often to look for tournaments about to start.
const REMINDER_SWEEP: Duration = Duration::from_secs(30);
/// How often to drop an expired undo buffer.
const UNDO_SWEEP: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let mut store = match &config.data_file {
        Some(path) => persist::load(path).map_err(std::io::Error::other)?,
        None => ArenaStore::new(),
    };
    for uid in store.set_admins(config.admin_uids.iter().cloned()) {
        log::warn!("Revoked admin rights of {} (no longer in ADMIN_UIDS)", uid);
    }
    log::info!("{} admin(s) configured", store.admins.len());

    let verifier = TokenVerifier::from_config(&config)?;
    if verifier.is_none() {
        log::warn!("Neither AUTH_SECRET nor AUTH_PUBLIC_KEY_FILE is set; sign-in is disabled");
    }

    let state = web::Data::new(RwLock::new(store));
    let settings = web::Data::new(Settings::new(
        config.data_file.clone(),
        config.undo_window,
        verifier,
    ));
    let key = session_key(config.session_key.as_deref());
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    // Background task: push start reminders for tournaments about to begin
    let state_reminders = state.clone();
    let settings_reminders = settings.clone();
    let lead = config.reminder_lead;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(REMINDER_SWEEP);
        loop {
            interval.tick().await;
            let batch = {
                let mut g = match state_reminders.write() {
                    Ok(guard) => guard,
                    Err(_) => continue,
                };
                let batch = collect_due_reminders(&mut g, Utc::now(), lead);
                if !batch.announced.is_empty() {
                    let _ = settings_reminders.save(&g);
                }
                batch
            };
            if !batch.announced.is_empty() {
                let sent = deliver(notifier.as_ref(), &batch.reminders);
                log::info!(
                    "Announced {} tournament(s), {} reminder(s) sent",
                    batch.announced.len(),
                    sent
                );
            }
        }
    });

    // Background task: forget the last deleted tournament once it can no longer be undone
    let state_cleanup = state.clone();
    let settings_cleanup = settings.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(UNDO_SWEEP);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            if expire_undo(&mut g, Utc::now(), settings_cleanup.undo_window) {
                log::debug!("Undo window closed for last deleted tournament");
                let _ = settings_cleanup.save(&g);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    let cookie_secure = config.cookie_secure;

    HttpServer::new(move || {
        App::new()
            .wrap(session_middleware(key.clone(), cookie_secure))
            .app_data(state.clone())
            .app_data(settings.clone())
            .configure(configure)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
