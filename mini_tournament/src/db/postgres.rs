//! PostgreSQL repository implementations.
#![allow(clippy::needless_raw_string_hashes)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};
use std::sync::Arc;

use super::repository::{PlayerRepository, TournamentRepository};
use crate::error::{is_foreign_key_violation, is_unique_violation};
use crate::player::{Player, PlayerError, PlayerId, PlayerInput, PlayerResult};
use crate::tournament::{
    Tournament, TournamentError, TournamentId, TournamentInput, TournamentResult,
};

/// Tournament columns plus the computed registration count
const TOURNAMENT_SELECT: &str = r#"
    SELECT t.id, t.name, t.max_players, t.start_at, t.created_at,
           (SELECT COUNT(*) FROM players p WHERE p.tournament_id = t.id) AS registered_players
    FROM tournaments t
"#;

const PLAYER_COLUMNS: &str = "id, name, email, tournament_id, registered_at";

fn tournament_from_row(row: &PgRow) -> Tournament {
    Tournament {
        id: row.get("id"),
        name: row.get("name"),
        max_players: row.get("max_players"),
        start_at: row.get::<DateTime<Utc>, _>("start_at"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        registered_players: row.get("registered_players"),
    }
}

fn player_from_row(row: &PgRow) -> Player {
    Player {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        tournament_id: row.get("tournament_id"),
        registered_at: row.get::<DateTime<Utc>, _>("registered_at"),
    }
}

/// Roll back a transaction that is being abandoned because of an error
async fn rollback(tx: Transaction<'_, Postgres>) {
    if let Err(e) = tx.rollback().await {
        log::warn!("Transaction rollback failed: {}", e);
    }
}

/// PostgreSQL implementation of `TournamentRepository`
#[derive(Clone)]
pub struct PgTournamentRepository {
    pool: Arc<PgPool>,
}

impl PgTournamentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn write_error(
        err: sqlx::Error,
        name: &str,
        op: fn(sqlx::Error) -> TournamentError,
    ) -> TournamentError {
        if is_unique_violation(&err) {
            TournamentError::NameExists(name.to_string())
        } else {
            TournamentError::storage(err, op)
        }
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn create_tournament(&self, input: &TournamentInput) -> TournamentResult<Tournament> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TournamentError::storage(e, TournamentError::Creation))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO tournaments (name, max_players, start_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, max_players, start_at, created_at, 0::BIGINT AS registered_players
            "#,
        )
        .bind(&input.name)
        .bind(input.max_players)
        .bind(input.start_at)
        .fetch_one(&mut *tx)
        .await;

        let row = match inserted {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(Self::write_error(e, &input.name, TournamentError::Creation));
            }
        };

        tx.commit()
            .await
            .map_err(|e| Self::write_error(e, &input.name, TournamentError::Creation))?;

        Ok(tournament_from_row(&row))
    }

    async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        let sql = format!("{TOURNAMENT_SELECT} WHERE t.id = $1");
        let row = sqlx::query(&sql)
            .bind(tournament_id)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| TournamentError::storage(e, TournamentError::Fetch))?
            .ok_or(TournamentError::NotFound(tournament_id))?;

        Ok(tournament_from_row(&row))
    }

    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        let sql = format!("{TOURNAMENT_SELECT} ORDER BY t.id");
        let rows = sqlx::query(&sql)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| TournamentError::storage(e, TournamentError::Fetch))?;

        Ok(rows.iter().map(tournament_from_row).collect())
    }

    async fn update_tournament(
        &self,
        tournament_id: TournamentId,
        input: &TournamentInput,
    ) -> TournamentResult<Tournament> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TournamentError::storage(e, TournamentError::Update))?;

        let updated = sqlx::query(
            r#"
            UPDATE tournaments
            SET name = $1, max_players = $2, start_at = $3
            WHERE id = $4
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(input.max_players)
        .bind(input.start_at)
        .bind(tournament_id)
        .fetch_optional(&mut *tx)
        .await;

        match updated {
            Ok(Some(_)) => {}
            Ok(None) => {
                rollback(tx).await;
                return Err(TournamentError::NotFound(tournament_id));
            }
            Err(e) => {
                rollback(tx).await;
                return Err(Self::write_error(e, &input.name, TournamentError::Update));
            }
        }

        let sql = format!("{TOURNAMENT_SELECT} WHERE t.id = $1");
        let row = match sqlx::query(&sql)
            .bind(tournament_id)
            .fetch_one(&mut *tx)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(TournamentError::storage(e, TournamentError::Update));
            }
        };

        tx.commit()
            .await
            .map_err(|e| Self::write_error(e, &input.name, TournamentError::Update))?;

        Ok(tournament_from_row(&row))
    }

    async fn delete_tournament(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TournamentError::storage(e, TournamentError::Deletion))?;

        // Players go with it via ON DELETE CASCADE
        let deleted = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await;

        match deleted {
            Ok(result) if result.rows_affected() == 0 => {
                rollback(tx).await;
                Err(TournamentError::NotFound(tournament_id))
            }
            Ok(_) => tx
                .commit()
                .await
                .map_err(|e| TournamentError::storage(e, TournamentError::Deletion)),
            Err(e) => {
                rollback(tx).await;
                Err(TournamentError::storage(e, TournamentError::Deletion))
            }
        }
    }
}

/// PostgreSQL implementation of `PlayerRepository`
#[derive(Clone)]
pub struct PgPlayerRepository {
    pool: Arc<PgPool>,
}

/// Outcome of checking a tournament for an open slot inside a transaction
enum SlotCheck {
    Open,
    Full,
    Missing,
}

impl PgPlayerRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Lock the tournament row and compare its registration count with its capacity
    ///
    /// The row lock serializes concurrent registrations for the same
    /// tournament until the surrounding transaction ends.
    async fn check_open_slot(
        tx: &mut Transaction<'_, Postgres>,
        tournament_id: TournamentId,
    ) -> Result<SlotCheck, sqlx::Error> {
        let Some(row) = sqlx::query("SELECT max_players FROM tournaments WHERE id = $1 FOR UPDATE")
            .bind(tournament_id)
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(SlotCheck::Missing);
        };
        let max_players: i32 = row.get("max_players");

        let registered: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM players WHERE tournament_id = $1")
                .bind(tournament_id)
                .fetch_one(&mut **tx)
                .await?;

        if registered >= i64::from(max_players) {
            Ok(SlotCheck::Full)
        } else {
            Ok(SlotCheck::Open)
        }
    }

    fn write_error(
        err: sqlx::Error,
        input: &PlayerInput,
        op: fn(sqlx::Error) -> PlayerError,
    ) -> PlayerError {
        if is_unique_violation(&err) {
            PlayerError::EmailExists {
                email: input.email.clone(),
                tournament_id: input.tournament_id,
            }
        } else if is_foreign_key_violation(&err) {
            PlayerError::TournamentNotFound(input.tournament_id)
        } else {
            PlayerError::storage(err, op)
        }
    }
}

#[async_trait]
impl PlayerRepository for PgPlayerRepository {
    async fn create_player(&self, input: &PlayerInput) -> PlayerResult<Player> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PlayerError::storage(e, PlayerError::Creation))?;

        match Self::check_open_slot(&mut tx, input.tournament_id).await {
            Ok(SlotCheck::Open) => {}
            Ok(SlotCheck::Full) => {
                rollback(tx).await;
                return Err(PlayerError::CapacityExceeded(input.tournament_id));
            }
            Ok(SlotCheck::Missing) => {
                rollback(tx).await;
                return Err(PlayerError::TournamentNotFound(input.tournament_id));
            }
            Err(e) => {
                rollback(tx).await;
                return Err(PlayerError::storage(e, PlayerError::Creation));
            }
        }

        let sql = format!(
            "INSERT INTO players (name, email, tournament_id) VALUES ($1, $2, $3) RETURNING {PLAYER_COLUMNS}"
        );
        let row = match sqlx::query(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.tournament_id)
            .fetch_one(&mut *tx)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(Self::write_error(e, input, PlayerError::Creation));
            }
        };

        tx.commit()
            .await
            .map_err(|e| Self::write_error(e, input, PlayerError::Creation))?;

        Ok(player_from_row(&row))
    }

    async fn get_player(&self, player_id: PlayerId) -> PlayerResult<Player> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(player_id)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| PlayerError::storage(e, PlayerError::Fetch))?
            .ok_or(PlayerError::NotFound(player_id))?;

        Ok(player_from_row(&row))
    }

    async fn list_players(&self) -> PlayerResult<Vec<Player>> {
        let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY id");
        let rows = sqlx::query(&sql)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| PlayerError::storage(e, PlayerError::Fetch))?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    async fn list_players_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> PlayerResult<Vec<Player>> {
        let sql =
            format!("SELECT {PLAYER_COLUMNS} FROM players WHERE tournament_id = $1 ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(tournament_id)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(|e| PlayerError::storage(e, PlayerError::Fetch))?;

        Ok(rows.iter().map(player_from_row).collect())
    }

    async fn count_players_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> PlayerResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM players WHERE tournament_id = $1")
            .bind(tournament_id)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| PlayerError::storage(e, PlayerError::Fetch))
    }

    async fn update_player(
        &self,
        player_id: PlayerId,
        input: &PlayerInput,
    ) -> PlayerResult<Player> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PlayerError::storage(e, PlayerError::Update))?;

        let current = sqlx::query("SELECT tournament_id FROM players WHERE id = $1 FOR UPDATE")
            .bind(player_id)
            .fetch_optional(&mut *tx)
            .await;

        let current_tournament: TournamentId = match current {
            Ok(Some(row)) => row.get("tournament_id"),
            Ok(None) => {
                rollback(tx).await;
                return Err(PlayerError::NotFound(player_id));
            }
            Err(e) => {
                rollback(tx).await;
                return Err(PlayerError::storage(e, PlayerError::Update));
            }
        };

        if current_tournament != input.tournament_id {
            match Self::check_open_slot(&mut tx, input.tournament_id).await {
                Ok(SlotCheck::Open) => {}
                Ok(SlotCheck::Full) => {
                    rollback(tx).await;
                    return Err(PlayerError::CapacityExceeded(input.tournament_id));
                }
                Ok(SlotCheck::Missing) => {
                    rollback(tx).await;
                    return Err(PlayerError::TournamentNotFound(input.tournament_id));
                }
                Err(e) => {
                    rollback(tx).await;
                    return Err(PlayerError::storage(e, PlayerError::Update));
                }
            }
        }

        let sql = format!(
            "UPDATE players SET name = $1, email = $2, tournament_id = $3 WHERE id = $4 RETURNING {PLAYER_COLUMNS}"
        );
        let row = match sqlx::query(&sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.tournament_id)
            .bind(player_id)
            .fetch_one(&mut *tx)
            .await
        {
            Ok(row) => row,
            Err(e) => {
                rollback(tx).await;
                return Err(Self::write_error(e, input, PlayerError::Update));
            }
        };

        tx.commit()
            .await
            .map_err(|e| Self::write_error(e, input, PlayerError::Update))?;

        Ok(player_from_row(&row))
    }

    async fn delete_player(&self, player_id: PlayerId) -> PlayerResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PlayerError::storage(e, PlayerError::Deletion))?;

        let deleted = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(player_id)
            .execute(&mut *tx)
            .await;

        match deleted {
            Ok(result) if result.rows_affected() == 0 => {
                rollback(tx).await;
                Err(PlayerError::NotFound(player_id))
            }
            Ok(_) => tx
                .commit()
                .await
                .map_err(|e| PlayerError::storage(e, PlayerError::Deletion)),
            Err(e) => {
                rollback(tx).await;
                Err(PlayerError::storage(e, PlayerError::Deletion))
            }
        }
    }
}
