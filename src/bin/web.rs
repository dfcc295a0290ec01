//! Single binary JSON API over in-memory Americano tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS (default 12).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use americano_scheduler::{
    FixtureIndex, FixtureTable, PlayerNumber, ScoreRecord, Settings, SettingsUpdate, Team,
    Tournament, TournamentError, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after a period of inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Server settings read from the environment.
struct ServerConfig {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or_else(default_inactivity_hours);
        Self {
            host,
            port,
            inactivity_timeout: Duration::from_secs(hours * 3600),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_inactivity_hours() -> u64 {
    12
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    settings: Settings,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct SetScoreBody {
    team: Team,
    /// `null` clears this side only.
    value: Option<u32>,
}

#[derive(Deserialize)]
struct ImportScoresBody {
    /// Court count the record was written under; only matters for legacy keys.
    court_count: u8,
    scores: ScoreRecord,
}

#[derive(Deserialize)]
struct FixtureTableBody {
    player_count: u8,
    #[serde(default)]
    court_variant: Option<u8>,
    /// Array of `{ teamA, teamB, resting }` records.
    fixtures: serde_json::Value,
}

/// Tournament plus the counters a scoreboard shows.
#[derive(Serialize)]
struct TournamentView<'a> {
    tournament: &'a Tournament,
    completed_matches: usize,
    total_matches: usize,
    total_timeslots: usize,
    games_per_player: (u32, u32),
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player: PlayerNumber,
}

#[derive(Deserialize)]
struct TournamentCourtPath {
    id: TournamentId,
    court: u8,
}

#[derive(Deserialize)]
struct TournamentFixturePath {
    id: TournamentId,
    fixture: FixtureIndex,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::NotEditable => HttpResponse::Forbidden().json(body),
        TournamentError::ScoresTiedToTable => HttpResponse::Conflict().json(body),
        TournamentError::FixtureNotFound(_)
        | TournamentError::PlayerNotFound(_)
        | TournamentError::CourtNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn view(t: &mut Tournament) -> HttpResponse {
    let summary = (|| -> Result<_, TournamentError> {
        Ok((
            t.completed_matches()?,
            t.total_matches()?,
            t.total_timeslots()?,
            t.games_per_player_range()?,
        ))
    })();
    match summary {
        Ok((completed_matches, total_matches, total_timeslots, games_per_player)) => {
            HttpResponse::Ok().json(TournamentView {
                tournament: t,
                completed_matches,
                total_matches,
                total_timeslots,
                games_per_player,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Look up a tournament, refresh its activity time and run `f` on it.
fn with_tournament(
    state: &AppState,
    id: TournamentId,
    f: impl FnOnce(&mut Tournament) -> HttpResponse,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Run a mutation and answer with the updated tournament.
fn mutate(
    state: &AppState,
    id: TournamentId,
    f: impl FnOnce(&mut Tournament) -> Result<(), TournamentError>,
) -> HttpResponse {
    with_tournament(state, id, |t| match f(t) {
        Ok(()) => view(t),
        Err(e) => error_response(&e),
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "americano-scheduler",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<CreateTournamentBody>>) -> HttpResponse {
    let (name, settings) = match body {
        Some(b) => {
            let b = b.into_inner();
            (b.name, b.settings)
        }
        None => (String::new(), Settings::default()),
    };
    let mut tournament = match Tournament::new(name, settings) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let id = tournament.id();
    let response = view(&mut tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, view)
}

/// Change player count, court count or scoring. Court count changes keep all scores.
#[put("/api/tournaments/{id}/settings")]
async fn api_update_settings(state: AppState, path: Path<TournamentPath>, body: Json<SettingsUpdate>) -> HttpResponse {
    mutate(&state, path.id, |t| t.update_settings(*body))
}

#[put("/api/tournaments/{id}/name")]
async fn api_rename_tournament(state: AppState, path: Path<TournamentPath>, body: Json<NameBody>) -> HttpResponse {
    let name = body.into_inner().name;
    mutate(&state, path.id, |t| t.rename(name.trim()))
}

#[put("/api/tournaments/{id}/players/{player}")]
async fn api_rename_player(state: AppState, path: Path<TournamentPlayerPath>, body: Json<NameBody>) -> HttpResponse {
    let name = body.into_inner().name;
    mutate(&state, path.id, |t| t.rename_player(path.player, name.trim()))
}

#[put("/api/tournaments/{id}/courts/{court}")]
async fn api_rename_court(state: AppState, path: Path<TournamentCourtPath>, body: Json<NameBody>) -> HttpResponse {
    let name = body.into_inner().name;
    mutate(&state, path.id, |t| t.rename_court(path.court, name.trim()))
}

#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, Tournament::start)
}

/// Current schedule: which fixtures play together, on which court, and who rests.
#[get("/api/tournaments/{id}/timeslots")]
async fn api_timeslots(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let court_names = t.court_names().to_vec();
        match t.timeslots() {
            Ok(timeslots) => HttpResponse::Ok().json(serde_json::json!({
                "court_names": court_names,
                "timeslots": timeslots,
            })),
            Err(e) => error_response(&e),
        }
    })
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.standings() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    })
}

/// Enter one team's score for a fixture.
#[put("/api/tournaments/{id}/scores/{fixture}")]
async fn api_set_score(state: AppState, path: Path<TournamentFixturePath>, body: Json<SetScoreBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match t.set_score(path.fixture, body.team, body.value) {
            Ok(score) => HttpResponse::Ok().json(score),
            Err(e) => error_response(&e),
        }
    })
}

#[delete("/api/tournaments/{id}/scores/{fixture}")]
async fn api_clear_score(state: AppState, path: Path<TournamentFixturePath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.clear_score(path.fixture) {
        Ok(()) => HttpResponse::Ok().json(t.score(path.fixture)),
        Err(e) => error_response(&e),
    })
}

#[delete("/api/tournaments/{id}/scores")]
async fn api_reset_scores(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, Tournament::reset_scores)
}

/// Scores in persisted form (`f_<index>` keys, -1 for unset).
#[get("/api/tournaments/{id}/scores")]
async fn api_export_scores(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t.score_record()))
}

/// Replace scores from a persisted record; legacy positional keys are migrated.
#[put("/api/tournaments/{id}/scores")]
async fn api_import_scores(state: AppState, path: Path<TournamentPath>, body: Json<ImportScoresBody>) -> HttpResponse {
    let body = body.into_inner();
    mutate(&state, path.id, |t| t.import_scores(&body.scores, body.court_count))
}

/// Install a fixture table supplied by the caller (e.g. for more than 12 players).
#[put("/api/tournaments/{id}/fixtures")]
async fn api_install_fixtures(state: AppState, path: Path<TournamentPath>, body: Json<FixtureTableBody>) -> HttpResponse {
    let body = body.into_inner();
    mutate(&state, path.id, |t| {
        let table = FixtureTable::from_json(body.player_count, body.court_variant, &body.fixtures.to_string())?;
        t.install_fixture_table(table)
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive past the timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_update_settings)
            .service(api_rename_tournament)
            .service(api_rename_player)
            .service(api_rename_court)
            .service(api_start_tournament)
            .service(api_timeslots)
            .service(api_standings)
            .service(api_set_score)
            .service(api_clear_score)
            .service(api_reset_scores)
            .service(api_export_scores)
            .service(api_import_scores)
            .service(api_install_fixtures)
    })
    .bind(bind)?
    .run()
    .await
}
