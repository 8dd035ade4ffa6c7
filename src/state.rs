// src/state.rs
use crate::{api::StudentApi, view::StudentView};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

/// Views kept when no capacity is configured.
pub const DEFAULT_VIEW_CAPACITY: usize = 256;

struct StoredView {
    view: StudentView,
    last_used: u64,
}

/// Mounted views, keyed by the student id from the URL, bounded to `capacity`.
///
/// When full, the least recently used view without pending or failed writes
/// is evicted first; only if every view has some is the oldest dropped anyway.
pub struct ViewStore {
    views: HashMap<String, StoredView>,
    capacity: usize,
    clock: u64,
}

impl ViewStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            views: HashMap::new(),
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    pub fn get(&mut self, student_id: &str) -> Option<&StudentView> {
        self.get_mut(student_id).map(|view| &*view)
    }

    pub fn get_mut(&mut self, student_id: &str) -> Option<&mut StudentView> {
        let now = self.tick();
        let stored = self.views.get_mut(student_id)?;
        stored.last_used = now;
        Some(&mut stored.view)
    }

    /// Peeks without counting as a use. Background writes go through this.
    pub fn get_untouched_mut(&mut self, student_id: &str) -> Option<&mut StudentView> {
        self.views.get_mut(student_id).map(|stored| &mut stored.view)
    }

    pub fn insert(&mut self, view: StudentView) {
        if !self.views.contains_key(&view.student_id) && self.views.len() >= self.capacity {
            self.evict_one();
        }
        let last_used = self.tick();
        self.views
            .insert(view.student_id.clone(), StoredView { view, last_used });
    }

    fn evict_one(&mut self) {
        let oldest = |settled_only: bool| {
            self.views
                .iter()
                .filter(|(_, stored)| !settled_only || !stored.view.has_unsettled_rows())
                .min_by_key(|(_, stored)| stored.last_used)
                .map(|(id, _)| id.clone())
        };

        let victim = oldest(true).or_else(|| oldest(false));
        if let Some(id) = victim {
            tracing::debug!("View store full, evicting view for student {}", id);
            self.views.remove(&id);
        }
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[derive(Clone)]
pub struct AppState<A> {
    pub api: A,
    // Written by request handlers and by the background write tasks
    pub views: Arc<Mutex<ViewStore>>,
}

impl<A: StudentApi> AppState<A> {
    pub fn new(api: A) -> Self {
        Self::with_view_capacity(api, DEFAULT_VIEW_CAPACITY)
    }

    pub fn with_view_capacity(api: A, capacity: usize) -> Self {
        Self {
            api,
            views: Arc::new(Mutex::new(ViewStore::with_capacity(capacity))),
        }
    }

    /// Snapshot of a mounted view, if any.
    pub async fn view(&self, student_id: &str) -> Option<StudentView> {
        self.views.lock().await.get(student_id).cloned()
    }
}
