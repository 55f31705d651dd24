use crate::models::FavoriteEntry;
use crate::store::FavoritesState;

/// Local half of a toggle: applied before the gateway call, then either
/// kept or rolled back once the call settles.
#[derive(Debug)]
pub(crate) enum PendingToggle {
    Added {
        id: String,
    },
    Removed {
        id: String,
        id_index: usize,
        entry: Option<(usize, FavoriteEntry)>,
    },
}

impl PendingToggle {
    /// Flips membership of `id`. `entry` is only used when adding.
    pub(crate) fn apply(state: &mut FavoritesState, id: &str, entry: FavoriteEntry) -> Self {
        match state.ids.iter().position(|existing| existing == id) {
            Some(id_index) => {
                state.ids.remove(id_index);
                let entry = state
                    .entries
                    .iter()
                    .position(|e| e.id == id)
                    .map(|index| (index, state.entries.remove(index)));
                PendingToggle::Removed {
                    id: id.to_string(),
                    id_index,
                    entry,
                }
            }
            None => {
                state.ids.push(id.to_string());
                state.entries.retain(|e| e.id != id);
                state.entries.push(entry);
                PendingToggle::Added { id: id.to_string() }
            }
        }
    }

    pub(crate) fn is_added(&self) -> bool {
        matches!(self, PendingToggle::Added { .. })
    }

    pub(crate) fn id(&self) -> &str {
        match self {
            PendingToggle::Added { id } | PendingToggle::Removed { id, .. } => id,
        }
    }

    /// Undoes this toggle's change to `id` only. Entries for other ids that
    /// changed in the meantime are left alone.
    pub(crate) fn rollback(self, state: &mut FavoritesState) {
        match self {
            PendingToggle::Added { id } => {
                state.ids.retain(|existing| *existing != id);
                state.entries.retain(|e| e.id != id);
            }
            PendingToggle::Removed {
                id,
                id_index,
                entry,
            } => {
                if !state.ids.contains(&id) {
                    let index = id_index.min(state.ids.len());
                    state.ids.insert(index, id.clone());
                }
                if let Some((index, entry)) = entry {
                    if !state.entries.iter().any(|e| e.id == id) {
                        let index = index.min(state.entries.len());
                        state.entries.insert(index, entry);
                    }
                }
            }
        }
    }
}
