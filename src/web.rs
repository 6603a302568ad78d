//! HTTP API: JSON endpoints over the store, cookie session for the signed-in uid.
//!
//! Every handler takes the store lock once, runs one `logic` operation, saves
//! the snapshot if it changed anything, and answers with JSON (or
//! `{ "error": message }`). A failed save answers 500.

use crate::auth::TokenVerifier;
use crate::logic::{
    admin_board, create_tournament, credit_coins, delete_tournament, join_tournament,
    kick_player, list_players, list_tournaments, register_notification_token, roster_csv,
    sign_in, tournament_card, undo_delete, update_profile, update_tournament, ProfileUpdate,
    TournamentFilter,
};
use crate::models::{ArenaError, ProfileCard, TournamentDraft, TournamentId, UserId, UserProfile};
use crate::persist;
use crate::store::ArenaStore;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query, ServiceConfig},
    HttpResponse, Responder,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Shared store. One lock serialises every mutation (joins included).
pub type AppState = Data<RwLock<ArenaStore>>;

/// Settings handlers need at request time.
#[derive(Clone, Debug)]
pub struct Settings {
    pub data_file: Option<PathBuf>,
    pub undo_window: Duration,
    /// Checks sign-in tokens. `None` refuses every sign-in.
    pub verifier: Option<TokenVerifier>,
    persist_failures: Arc<AtomicU64>,
}

impl Settings {
    pub fn new(data_file: Option<PathBuf>, undo_window: Duration, verifier: Option<TokenVerifier>) -> Self {
        Self {
            data_file,
            undo_window,
            verifier,
            persist_failures: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Write the snapshot if a data file is configured. Failures are logged and counted.
    pub fn save(&self, store: &ArenaStore) -> Result<(), persist::PersistError> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };
        persist::save(path, store).map_err(|e| {
            self.persist_failures.fetch_add(1, Ordering::Relaxed);
            log::error!("Failed to persist store to {}: {}", path.display(), e);
            e
        })
    }

    /// Saves that failed since start.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }
}

type AppSettings = Data<Settings>;

const SESSION_UID: &str = "uid";

/// Session key from configuration, or a fresh random one (sessions then end on restart).
pub fn session_key(configured: Option<&str>) -> Key {
    match configured.map(|k| Key::try_from(k.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            log::warn!("SESSION_KEY must be at least 64 bytes; using a random key");
            Key::generate()
        }
        None => {
            log::warn!("SESSION_KEY not set; sessions will not survive a restart");
            Key::generate()
        }
    }
}

/// Signed (not encrypted) cookie holding the uid.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("ff_session".to_string())
        .cookie_secure(secure)
        .cookie_content_security(CookieContentSecurity::Signed)
        .build()
}

/// Register every API route.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(index)
        .service(api_health)
        .service(favicon)
        .service(api_sign_in)
        .service(api_sign_out)
        .service(api_me)
        .service(api_update_profile)
        .service(api_notification_token)
        .service(api_list_tournaments)
        .service(api_get_tournament)
        .service(api_join_tournament)
        .service(api_admin_list)
        .service(api_admin_create)
        .service(api_admin_undo_delete)
        .service(api_admin_update)
        .service(api_admin_delete)
        .service(api_admin_players)
        .service(api_admin_players_csv)
        .service(api_admin_kick)
        .service(api_admin_credit_coins);
}

fn error_response(e: &ArenaError) -> HttpResponse {
    use ArenaError::*;
    let mut builder = match e {
        NotSignedIn | InvalidCredential => HttpResponse::Unauthorized(),
        Forbidden => HttpResponse::Forbidden(),
        UserNotFound(_) | TournamentNotFound(_) | PlayerNotFound(_) => HttpResponse::NotFound(),
        TournamentStarted | TournamentFull | AlreadyJoined | FfUidTaken | SeatsBelowJoined { .. } => {
            HttpResponse::Conflict()
        }
        _ => HttpResponse::BadRequest(),
    };
    log::debug!("Request refused: {}", e);
    builder.json(serde_json::json!({ "error": e.to_string() }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn session_uid(session: &Session) -> Result<UserId, ArenaError> {
    session
        .get::<UserId>(SESSION_UID)
        .ok()
        .flatten()
        .ok_or(ArenaError::NotSignedIn)
}

/// `response` once the change is on disk; 500 when the snapshot could not be written.
fn saved(settings: &Settings, store: &ArenaStore, response: HttpResponse) -> HttpResponse {
    match settings.save(store) {
        Ok(()) => response,
        Err(_) => save_error(),
    }
}

fn save_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": "Change could not be saved" }))
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    persist_failures: u64,
}

#[derive(Deserialize)]
struct SignInBody {
    #[serde(default)]
    id_token: String,
}

#[derive(Serialize)]
struct MeResponse {
    profile: UserProfile,
    card: ProfileCard,
    is_admin: bool,
    needs_profile: bool,
    joined: BTreeSet<TournamentId>,
}

#[derive(Deserialize)]
struct NotificationTokenBody {
    token: String,
}

#[derive(Deserialize)]
struct ListQuery {
    category: Option<String>,
    match_type: Option<String>,
}

#[derive(Deserialize)]
struct KickQuery {
    #[serde(default)]
    refund: bool,
}

#[derive(Deserialize)]
struct CreditCoinsBody {
    amount: u64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player uid
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    uid: UserId,
}

#[derive(Deserialize)]
struct UserPath {
    uid: UserId,
}

/// Player and admin page; everything else it needs comes from the API.
#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../templates/index.html"))
}

/// `ok` turns false once any snapshot write has failed.
#[get("/api/health")]
async fn api_health(settings: AppSettings) -> impl Responder {
    let persist_failures = settings.persist_failures();
    HttpResponse::Ok().json(HealthResponse {
        ok: persist_failures == 0,
        service: "ff-tournament-web",
        persist_failures,
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Verify the provider's ID token, record the sign-in and start a session.
#[post("/api/auth/sign-in")]
async fn api_sign_in(
    state: AppState,
    settings: AppSettings,
    session: Session,
    body: Json<SignInBody>,
) -> HttpResponse {
    let identity = match &settings.verifier {
        Some(verifier) => verifier.verify(&body.id_token),
        None => {
            log::warn!("Sign-in refused: no AUTH_SECRET or AUTH_PUBLIC_KEY_FILE configured");
            Err(ArenaError::InvalidCredential)
        }
    };
    let identity = match identity {
        Ok(identity) => identity,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let outcome = match sign_in(&mut store, &identity, Utc::now()) {
        Ok(outcome) => outcome,
        Err(e) => return error_response(&e),
    };
    if settings.save(&store).is_err() {
        return save_error();
    }
    session.renew();
    if let Err(e) = session.insert(SESSION_UID, &outcome.profile.uid) {
        log::error!("Failed to write session: {}", e);
        return HttpResponse::InternalServerError().body("session error");
    }
    log::info!("{} signed in", outcome.profile.uid);
    HttpResponse::Ok().json(outcome)
}

#[post("/api/auth/sign-out")]
async fn api_sign_out(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Current profile, display card, admin flag and joined tournament ids.
#[get("/api/me")]
async fn api_me(state: AppState, session: Session) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.user(&uid) {
        Ok(profile) => HttpResponse::Ok().json(MeResponse {
            card: profile.card(),
            is_admin: store.is_admin(&uid),
            needs_profile: profile.needs_completion(),
            joined: store.joined_by(&uid),
            profile: profile.clone(),
        }),
        Err(_) => error_response(&ArenaError::NotSignedIn),
    }
}

#[put("/api/me/profile")]
async fn api_update_profile(
    state: AppState,
    settings: AppSettings,
    session: Session,
    body: Json<ProfileUpdate>,
) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match update_profile(&mut store, &uid, body.into_inner(), Utc::now()) {
        Ok(profile) => saved(&settings, &store, HttpResponse::Ok().json(profile)),
        Err(e) => error_response(&e),
    }
}

#[put("/api/me/notification-token")]
async fn api_notification_token(
    state: AppState,
    settings: AppSettings,
    session: Session,
    body: Json<NotificationTokenBody>,
) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match register_notification_token(&mut store, &uid, &body.token) {
        Ok(()) => saved(&settings, &store, HttpResponse::NoContent().finish()),
        Err(e) => error_response(&e),
    }
}

/// Public list, soonest first. `?category=br|cs|all&match_type=Solo|...|all`.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, session: Session, query: Query<ListQuery>) -> HttpResponse {
    let viewer = session_uid(&session).ok();
    let filter = TournamentFilter::parse(query.category.as_deref(), query.match_type.as_deref());
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(list_tournaments(&store, filter, viewer.as_deref(), Utc::now()))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    let viewer = session_uid(&session).ok();
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match tournament_card(&store, path.id, viewer.as_deref(), Utc::now()) {
        Ok(card) => HttpResponse::Ok().json(card),
        Err(e) => error_response(&e),
    }
}

/// Spend the entry fee and take a seat.
#[post("/api/tournaments/{id}/join")]
async fn api_join_tournament(
    state: AppState,
    settings: AppSettings,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match join_tournament(&mut store, path.id, &uid, Utc::now()) {
        Ok(receipt) => saved(&settings, &store, HttpResponse::Ok().json(receipt)),
        Err(e) => error_response(&e),
    }
}

/// Admin board: latest first, stale soon/now tournaments hidden.
#[get("/api/admin/tournaments")]
async fn api_admin_list(state: AppState, session: Session) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match admin_board(&store, &uid, Utc::now()) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

#[post("/api/admin/tournaments")]
async fn api_admin_create(
    state: AppState,
    settings: AppSettings,
    session: Session,
    body: Json<TournamentDraft>,
) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match create_tournament(&mut store, &uid, body.into_inner(), Utc::now()) {
        Ok(t) => saved(&settings, &store, HttpResponse::Created().json(t)),
        Err(e) => error_response(&e),
    }
}

/// Restore the most recently deleted tournament (within the undo window).
#[post("/api/admin/tournaments/undo-delete")]
async fn api_admin_undo_delete(state: AppState, settings: AppSettings, session: Session) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match undo_delete(&mut store, &uid, Utc::now(), settings.undo_window) {
        Ok(t) => saved(&settings, &store, HttpResponse::Ok().json(t)),
        Err(e) => error_response(&e),
    }
}

#[put("/api/admin/tournaments/{id}")]
async fn api_admin_update(
    state: AppState,
    settings: AppSettings,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<TournamentDraft>,
) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match update_tournament(&mut store, &uid, path.id, body.into_inner(), Utc::now()) {
        Ok(t) => saved(&settings, &store, HttpResponse::Ok().json(t)),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/admin/tournaments/{id}")]
async fn api_admin_delete(
    state: AppState,
    settings: AppSettings,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match delete_tournament(&mut store, &uid, path.id, Utc::now()) {
        Ok(t) => saved(
            &settings,
            &store,
            HttpResponse::Ok().json(serde_json::json!({
                "deleted": t.id,
                "title": t.title,
                "undo_window_secs": settings.undo_window.num_seconds(),
            })),
        ),
        Err(e) => error_response(&e),
    }
}

#[get("/api/admin/tournaments/{id}/players")]
async fn api_admin_players(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match list_players(&store, &uid, path.id) {
        Ok(players) => HttpResponse::Ok().json(serde_json::json!({
            "total_joined": players.len(),
            "players": players,
        })),
        Err(e) => error_response(&e),
    }
}

#[get("/api/admin/tournaments/{id}/players.csv")]
async fn api_admin_players_csv(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    let uid = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let players = match list_players(&store, &uid, path.id) {
        Ok(players) => players,
        Err(e) => return error_response(&e),
    };
    match roster_csv(&players) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}-players.csv\"", path.id),
            ))
            .body(csv),
        Err(e) => {
            log::error!("Roster export failed for {}: {}", path.id, e);
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

/// Kick a player; `?refund=true` returns their entry fee.
#[delete("/api/admin/tournaments/{id}/players/{uid}")]
async fn api_admin_kick(
    state: AppState,
    settings: AppSettings,
    session: Session,
    path: Path<TournamentPlayerPath>,
    query: Query<KickQuery>,
) -> HttpResponse {
    let admin = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match kick_player(&mut store, &admin, path.id, &path.uid, query.refund) {
        Ok(player) => saved(&settings, &store, HttpResponse::Ok().json(player)),
        Err(e) => error_response(&e),
    }
}

#[post("/api/admin/users/{uid}/coins")]
async fn api_admin_credit_coins(
    state: AppState,
    settings: AppSettings,
    session: Session,
    path: Path<UserPath>,
    body: Json<CreditCoinsBody>,
) -> HttpResponse {
    let admin = match session_uid(&session) {
        Ok(uid) => uid,
        Err(e) => return error_response(&e),
    };
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match credit_coins(&mut store, &admin, &path.uid, body.amount) {
        Ok(coins) => saved(
            &settings,
            &store,
            HttpResponse::Ok().json(serde_json::json!({ "uid": path.uid, "coins": coins })),
        ),
        Err(e) => error_response(&e),
    }
}
