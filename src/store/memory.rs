//! In-memory gateway for development and tests. A session reads from a private copy of the
//! tables taken at `begin` and logs its writes; `commit` checks the log against the shared
//! tables under the write lock and replays it. Replacing or removing a row that another
//! session removed meanwhile fails with `StoreError::Missing`, as it does in PostgreSQL.
//! Otherwise concurrent sessions resolve as last-writer-wins per entity.

use super::{Entity, Gateway, Session};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

type Tables = HashMap<&'static str, BTreeMap<String, Value>>;

#[derive(Clone, Default)]
pub struct MemoryGateway {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed rows of one kind.
    pub async fn count<E: Entity>(&self) -> usize {
        self.tables
            .read()
            .await
            .get(E::TABLE.name)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    type Session = MemorySession;

    async fn begin(&self) -> Result<MemorySession, StoreError> {
        let view = self.tables.read().await.clone();
        Ok(MemorySession {
            shared: self.tables.clone(),
            view,
            pending: Vec::new(),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

enum Op {
    Insert(Value),
    Replace(Value),
    Delete,
}

struct Change {
    entity: &'static str,
    table: &'static str,
    id: String,
    op: Op,
}

/// First change that no longer applies to the committed tables, in log order.
fn conflict(pending: &[Change], shared: &Tables) -> Option<StoreError> {
    let mut present: HashMap<(&str, &str), bool> = HashMap::new();
    for change in pending {
        let key = (change.table, change.id.as_str());
        let exists = match present.get(&key) {
            Some(exists) => *exists,
            None => shared
                .get(change.table)
                .is_some_and(|rows| rows.contains_key(&change.id)),
        };
        match (&change.op, exists) {
            (Op::Insert(_), true) => {
                return Some(StoreError::Duplicate {
                    entity: change.entity,
                    id: change.id.clone(),
                })
            }
            (Op::Replace(_) | Op::Delete, false) => {
                return Some(StoreError::Missing {
                    entity: change.entity,
                    id: change.id.clone(),
                })
            }
            _ => {}
        }
        present.insert(key, !matches!(change.op, Op::Delete));
    }
    None
}

pub struct MemorySession {
    shared: Arc<RwLock<Tables>>,
    view: Tables,
    pending: Vec<Change>,
}

impl MemorySession {
    fn contains<E: Entity>(&self, id: &str) -> bool {
        self.view
            .get(E::TABLE.name)
            .is_some_and(|rows| rows.contains_key(id))
    }

    fn put<E: Entity>(&mut self, entity: &E, insert: bool) -> Result<(), StoreError> {
        let row = serde_json::to_value(entity)?;
        let id = entity.id().to_string();
        self.view
            .entry(E::TABLE.name)
            .or_default()
            .insert(id.clone(), row.clone());
        self.pending.push(Change {
            entity: E::LABEL,
            table: E::TABLE.name,
            id,
            op: if insert { Op::Insert(row) } else { Op::Replace(row) },
        });
        Ok(())
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn all<E: Entity>(&mut self) -> Result<Vec<E>, StoreError> {
        let Some(rows) = self.view.get(E::TABLE.name) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(rows.len());
        for row in rows.values() {
            out.push(serde_json::from_value(row.clone())?);
        }
        Ok(out)
    }

    async fn find<E: Entity>(&mut self, id: &str) -> Result<Option<E>, StoreError> {
        match self.view.get(E::TABLE.name).and_then(|rows| rows.get(id)) {
            Some(row) => Ok(Some(serde_json::from_value(row.clone())?)),
            None => Ok(None),
        }
    }

    async fn insert<E: Entity>(&mut self, entity: &E) -> Result<(), StoreError> {
        if self.contains::<E>(entity.id()) {
            return Err(StoreError::Duplicate {
                entity: E::LABEL,
                id: entity.id().to_string(),
            });
        }
        self.put(entity, true)
    }

    async fn replace<E: Entity>(&mut self, entity: &E) -> Result<(), StoreError> {
        if !self.contains::<E>(entity.id()) {
            return Err(StoreError::Missing {
                entity: E::LABEL,
                id: entity.id().to_string(),
            });
        }
        self.put(entity, false)
    }

    async fn remove<E: Entity>(&mut self, id: &str) -> Result<(), StoreError> {
        let removed = self
            .view
            .get_mut(E::TABLE.name)
            .and_then(|rows| rows.remove(id));
        if removed.is_none() {
            return Err(StoreError::Missing {
                entity: E::LABEL,
                id: id.to_string(),
            });
        }
        self.pending.push(Change {
            entity: E::LABEL,
            table: E::TABLE.name,
            id: id.to_string(),
            op: Op::Delete,
        });
        Ok(())
    }

    /// On conflict nothing is applied and the session restarts from the committed tables.
    async fn commit(&mut self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let mut shared = self.shared.write().await;
        if let Some(err) = conflict(&self.pending, &shared) {
            self.pending.clear();
            self.view = (*shared).clone();
            return Err(err);
        }
        for change in self.pending.drain(..) {
            match change.op {
                Op::Insert(row) | Op::Replace(row) => {
                    shared.entry(change.table).or_default().insert(change.id, row);
                }
                Op::Delete => {
                    if let Some(rows) = shared.get_mut(change.table) {
                        rows.remove(&change.id);
                    }
                }
            }
        }
        Ok(())
    }
}
