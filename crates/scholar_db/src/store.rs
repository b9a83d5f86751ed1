//! Postgres-backed implementation of the persistence boundary.
//!
//! Rows keep the backend canonical (camelCase) field naming inside the
//! JSONB bag; translation to form-local names happens here, on the way
//! in and out, so nothing above this layer ever sees backend names in a
//! draft.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use scholar_core::codec;
use scholar_core::models::{
    Category, ConferenceSubType, Contribution, FieldSuggestion, FieldValue, PublicationType,
    SuggestionStatus, WorkflowStatus,
};
use scholar_service::{ContributionSnapshot, ContributionStore, StoreError};

use crate::error::{Error, Result};

#[derive(Clone)]
pub struct PgContributionStore {
    pool: PgPool,
}

impl PgContributionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a fresh draft. Used by the CLI and by review tooling; the
    /// engine itself only ever updates existing rows.
    pub async fn create_contribution(&self, contribution: &Contribution) -> Result<Uuid> {
        let categories: Vec<&str> = contribution
            .selected_indexing_categories
            .iter()
            .map(Category::as_str)
            .collect();
        let fields = fields_to_json(&contribution.fields)?;

        sqlx::query(
            r#"
            INSERT INTO contributions
            (id, publication_type, conference_sub_type, status, indexing_categories, fields)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(contribution.id)
        .bind(contribution.publication_type().as_str())
        .bind(contribution.conference_sub_type().map(|s| s.as_str()))
        .bind(contribution.status.as_str())
        .bind(serde_json::json!(categories))
        .bind(fields)
        .execute(&self.pool)
        .await?;

        Ok(contribution.id)
    }

    /// Files a reviewer suggestion against an existing contribution. A
    /// field carries at most one open suggestion at a time; a second one
    /// is refused here, and a partial unique index backstops the race.
    pub async fn insert_suggestion(
        &self,
        contribution_id: Uuid,
        suggestion: &FieldSuggestion,
    ) -> Result<Uuid> {
        let open = sqlx::query(
            r#"
            SELECT id FROM suggestions
            WHERE contribution_id = $1 AND field_name = $2 AND status = 'pending'
            "#,
        )
        .bind(contribution_id)
        .bind(&suggestion.field_name)
        .fetch_optional(&self.pool)
        .await?;
        if let Some(row) = open {
            let existing: Uuid = row.get("id");
            return Err(Error::Conflict(format!(
                "field '{}' already has open suggestion {existing}",
                suggestion.field_name
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO suggestions
            (id, contribution_id, field_name, original_value, suggested_value,
             suggestion_note, reviewer_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(suggestion.id)
        .bind(contribution_id)
        .bind(&suggestion.field_name)
        .bind(&suggestion.original_value)
        .bind(&suggestion.suggested_value)
        .bind(&suggestion.suggestion_note)
        .bind(suggestion.reviewer_id)
        .bind(suggestion.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(suggestion.id)
    }
}

fn fields_to_json(fields: &BTreeMap<String, FieldValue>) -> Result<serde_json::Value> {
    let mut bag = serde_json::Map::new();
    for (local, value) in fields {
        let backend = codec::to_backend_name(local).to_string();
        let encoded =
            serde_json::to_value(value).map_err(|e| Error::Corrupt(e.to_string()))?;
        bag.insert(backend, encoded);
    }
    Ok(serde_json::Value::Object(bag))
}

fn fields_from_json(value: serde_json::Value) -> Result<BTreeMap<String, FieldValue>> {
    let serde_json::Value::Object(bag) = value else {
        return Err(Error::Corrupt("fields column is not an object".into()));
    };
    let mut fields = BTreeMap::new();
    for (backend, raw) in bag {
        let decoded: FieldValue =
            serde_json::from_value(raw).map_err(|e| Error::Corrupt(e.to_string()))?;
        fields.insert(codec::to_local_name(&backend).to_string(), decoded);
    }
    Ok(fields)
}

fn categories_from_json(value: serde_json::Value) -> BTreeSet<Category> {
    codec::parse_list_json(&value)
        .iter()
        .filter_map(|t| Category::from_token(t))
        .collect()
}

fn store_err(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn corrupt(err: Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl ContributionStore for PgContributionStore {
    async fn fetch_contribution(&self, id: Uuid) -> std::result::Result<ContributionSnapshot, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT publication_type, conference_sub_type, status, indexing_categories, fields
            FROM contributions WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?
        .ok_or(StoreError::NotFound(id))?;

        let publication_type: String = row.get("publication_type");
        let publication_type = PublicationType::from_token(&publication_type)
            .ok_or_else(|| StoreError::Backend(format!("unknown publication type '{publication_type}'")))?;
        let conference_sub_type: Option<String> = row.get("conference_sub_type");
        let conference_sub_type = conference_sub_type
            .as_deref()
            .and_then(ConferenceSubType::from_token);
        let status: String = row.get("status");
        let status = WorkflowStatus::from_token(&status)
            .ok_or_else(|| StoreError::Backend(format!("unknown workflow status '{status}'")))?;
        let categories = categories_from_json(row.get("indexing_categories"));
        let fields = fields_from_json(row.get("fields")).map_err(corrupt)?;

        let contribution =
            Contribution::from_parts(id, publication_type, conference_sub_type, status, categories, fields);

        let rows = sqlx::query(
            r#"
            SELECT id, field_name, original_value, suggested_value, suggestion_note,
                   reviewer_id, status
            FROM suggestions WHERE contribution_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        let mut edit_suggestions = Vec::with_capacity(rows.len());
        for row in rows {
            let status: String = row.get("status");
            let status = SuggestionStatus::from_token(&status)
                .ok_or_else(|| StoreError::Backend(format!("unknown suggestion status '{status}'")))?;
            edit_suggestions.push(FieldSuggestion {
                id: row.get("id"),
                field_name: row.get("field_name"),
                original_value: row.get("original_value"),
                suggested_value: row.get("suggested_value"),
                suggestion_note: row.get("suggestion_note"),
                reviewer_id: row.get("reviewer_id"),
                status,
            });
        }

        Ok(ContributionSnapshot {
            contribution,
            edit_suggestions,
        })
    }

    async fn update_contribution(
        &self,
        id: Uuid,
        fields: &BTreeMap<String, FieldValue>,
    ) -> std::result::Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        // Read-modify-write under the transaction so a concurrent save
        // cannot interleave between the merge and the write.
        let row = sqlx::query("SELECT fields FROM contributions WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(store_err)?
            .ok_or(StoreError::NotFound(id))?;

        let mut bag: serde_json::Value = row.get("fields");
        let Some(object) = bag.as_object_mut() else {
            return Err(StoreError::Backend("fields column is not an object".into()));
        };

        let mut categories: Option<serde_json::Value> = None;
        for (backend_name, value) in fields {
            if backend_name == codec::to_backend_name(scholar_core::fields::INDEXING_CATEGORIES) {
                if let FieldValue::Tokens(tokens) = value {
                    categories = Some(serde_json::json!(tokens));
                    continue;
                }
            }
            let encoded = serde_json::to_value(value)
                .map_err(|e| StoreError::Backend(e.to_string()))?;
            object.insert(backend_name.clone(), encoded);
        }

        let result = match categories {
            Some(cats) => {
                sqlx::query(
                    "UPDATE contributions SET fields = $2, indexing_categories = $3 WHERE id = $1",
                )
                .bind(id)
                .bind(&bag)
                .bind(cats)
                .execute(&mut *tx)
                .await
            }
            None => {
                sqlx::query("UPDATE contributions SET fields = $2 WHERE id = $1")
                    .bind(id)
                    .bind(&bag)
                    .execute(&mut *tx)
                    .await
            }
        }
        .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        tx.commit().await.map_err(store_err)?;
        Ok(())
    }

    async fn respond_to_suggestion(
        &self,
        id: Uuid,
        accept: bool,
    ) -> std::result::Result<(), StoreError> {
        let status = if accept { "accepted" } else { "rejected" };
        let result = sqlx::query(
            "UPDATE suggestions SET status = $2 WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        if result.rows_affected() == 0 {
            // Either the row is missing or another reviewer got there
            // first; the distinction matters to the caller.
            let existing = sqlx::query("SELECT status FROM suggestions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(store_err)?;
            return match existing {
                None => Err(StoreError::NotFound(id)),
                Some(row) => {
                    let current: String = row.get("status");
                    Err(StoreError::Conflict(format!(
                        "suggestion {id} is already {current}"
                    )))
                }
            };
        }
        Ok(())
    }

    async fn resubmit_contribution(&self, id: Uuid) -> std::result::Result<(), StoreError> {
        let result = sqlx::query("UPDATE contributions SET status = 'resubmitted' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
