//! Single binary web server: REST API for the squash tournament tracker.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), STORAGE_PATH
//! (path to a JSON snapshot file; unset keeps everything in memory).

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use squash_tournament_web::{
    GameScore, MatchId, NewTournament, ServiceError, TournamentId, TournamentService, User,
};
use std::sync::RwLock;

/// Shared state: the whole service behind one lock. A single logical writer
/// per tournament is assumed; the lock serializes all mutations.
type AppState = Data<RwLock<TournamentService>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterBody {
    login: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Deserialize)]
struct LoginBody {
    login: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    scores: Vec<GameScore>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segment: match id (e.g. /api/matches/{id}/score)
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segment: user login (e.g. /api/users/{login})
#[derive(Deserialize)]
struct UserPath {
    login: String,
}

/// Map service errors to status codes; body is always `{ "error": ... }`.
fn error_response(e: &ServiceError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ServiceError::UserNotFound
        | ServiceError::TournamentNotFound
        | ServiceError::MatchNotFound => HttpResponse::NotFound().json(body),
        ServiceError::NotAuthorized => HttpResponse::Forbidden().json(body),
        ServiceError::Storage(_) | ServiceError::Csv(_) => {
            log::error!("internal error: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Resolve the session cookie to a full user record.
fn current_user(session: &Session, service: &TournamentService) -> Option<User> {
    let login = session.get::<String>("login").ok().flatten()?;
    service.find_user(&login)
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Not logged in" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "squash-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Register a new user and log them in.
#[post("/api/auth/register")]
async fn api_register(state: AppState, session: Session, body: Json<RegisterBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.register_user(&body.login, &body.display_name) {
        Ok(user) => {
            if session.insert("login", &user.login).is_err() {
                return HttpResponse::InternalServerError().body("session error");
            }
            HttpResponse::Ok().json(user)
        }
        Err(e) => error_response(&e),
    }
}

/// Log in by login name (auth transport is deliberately trivial).
#[post("/api/auth/login")]
async fn api_login(state: AppState, session: Session, body: Json<LoginBody>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.find_user(body.login.trim()) {
        Some(user) => {
            if session.insert("login", &user.login).is_err() {
                return HttpResponse::InternalServerError().body("session error");
            }
            HttpResponse::Ok().json(user)
        }
        None => HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Unknown login" })),
    }
}

#[post("/api/auth/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// The logged-in user, or 401.
#[get("/api/auth/me")]
async fn api_me(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match current_user(&session, &g) {
        Some(user) => HttpResponse::Ok().json(user),
        None => unauthorized(),
    }
}

#[get("/api/users")]
async fn api_users(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.users())
}

/// Update a profile (self, or any profile for Admin-role users).
#[put("/api/users/{login}")]
async fn api_update_user(
    state: AppState,
    session: Session,
    path: Path<UserPath>,
    body: Json<User>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let actor = match current_user(&session, &g) {
        Some(u) => u,
        None => return unauthorized(),
    };
    let mut updated = body.into_inner();
    updated.login = path.login.clone();
    match g.update_profile(updated, &actor) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(&e),
    }
}

/// Create a tournament (logged-in users; creator becomes admin).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    session: Session,
    body: Json<NewTournament>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let actor = match current_user(&session, &g) {
        Some(u) => u,
        None => return unauthorized(),
    };
    match g.create_tournament(body.into_inner(), &actor) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// All tournaments, most recent first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.tournaments())
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournament(path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "Tournament not found" }))
        }
    }
}

/// Join a Draft tournament as the logged-in user.
#[post("/api/tournaments/{id}/join")]
async fn api_join_tournament(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let actor = match current_user(&session, &g) {
        Some(u) => u,
        None => return unauthorized(),
    };
    match g.join_tournament(path.id, &actor) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Generate the schedule and activate the tournament (tournament admin only).
#[post("/api/tournaments/{id}/schedule")]
async fn api_generate_schedule(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let actor = match current_user(&session, &g) {
        Some(u) => u,
        None => return unauthorized(),
    };
    match g.generate_schedule(path.id, &actor) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/matches")]
async fn api_tournament_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.matches(path.id))
}

/// Pool standings, display-sorted within each pool.
#[get("/api/tournaments/{id}/standings")]
async fn api_tournament_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.standings(path.id))
}

/// Standings as a CSV download.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_tournament_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.standings_csv(path.id) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(&e),
    }
}

/// Record a score update for a match (players, tournament admin, or Admin).
#[put("/api/matches/{id}/score")]
async fn api_update_match_score(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let actor = match current_user(&session, &g) {
        Some(u) => u,
        None => return unauthorized(),
    };
    match g.update_match(path.id, body.into_inner().scores, &actor) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Full audit trail (Admin-role users only).
#[get("/api/audit")]
async fn api_audit_log(state: AppState, session: Session) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let actor = match current_user(&session, &g) {
        Some(u) => u,
        None => return unauthorized(),
    };
    if !actor.is_admin() {
        return HttpResponse::Forbidden().json(serde_json::json!({ "error": "Admins only" }));
    }
    HttpResponse::Ok().json(g.audit_log())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let store = squash_tournament_web::store_from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let mut service = TournamentService::new(store);
    service
        .seed_demo_users()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let state = Data::new(RwLock::new(service));

    // Fresh key per process: sessions don't survive a restart, which is fine
    // for login-by-name.
    let session_key = Key::generate();

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .service(api_health)
            .service(favicon)
            .service(api_register)
            .service(api_login)
            .service(api_logout)
            .service(api_me)
            .service(api_users)
            .service(api_update_user)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_join_tournament)
            .service(api_generate_schedule)
            .service(api_tournament_matches)
            .service(api_tournament_standings)
            .service(api_tournament_standings_csv)
            .service(api_update_match_score)
            .service(api_audit_log)
    })
    .bind(bind)?
    .run()
    .await
}
