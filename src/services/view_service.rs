// src/services/view_service.rs
use crate::{
    api::{RequestContext, StudentApi},
    models::attendance::Presence,
    state::AppState,
    view::{PendingWrite, StudentView},
};
use tokio::task::JoinHandle;

/// Fetches the student and their attendances and stores a fresh view,
/// replacing any view already mounted for this id.
///
/// The two reads run concurrently and fail independently: a failed read is
/// logged and leaves its slot empty. A view whose attendance read failed has
/// nothing to edit, so it is rendered but not stored.
pub async fn mount<A: StudentApi>(state: &AppState<A>, student_id: &str) -> StudentView {
    tracing::debug!("Mounting view for student {}", student_id);

    let (details, attendances) = tokio::join!(
        state.api.student_details(student_id),
        state.api.student_attendances(student_id),
    );

    let student = details
        .map_err(|e| tracing::warn!("Student details for {} unavailable: {}", student_id, e))
        .ok();
    let attendances = attendances
        .map_err(|e| tracing::warn!("Attendances for {} unavailable: {}", student_id, e))
        .ok();

    let mut view = StudentView::mounted(student_id, student, attendances);
    if !view.attendances_loaded {
        return view;
    }

    let mut views = state.views.lock().await;
    if let Some(previous) = views.get(student_id) {
        view.continue_writes_from(previous);
    }
    views.insert(view.clone());
    view
}

/// The mounted view for `student_id`. Mounts on first display, and again
/// while the stored view is missing a slot because a read failed.
pub async fn current_or_mount<A: StudentApi>(state: &AppState<A>, student_id: &str) -> StudentView {
    match state.view(student_id).await {
        Some(view) if !view.needs_refetch() => view,
        Some(_) => {
            tracing::debug!("Stored view for {} is incomplete, fetching again", student_id);
            mount(state, student_id).await
        }
        None => mount(state, student_id).await,
    }
}

/// Applies a presence change to the mounted view and sends it to the backend.
///
/// Returns the handle of the background write, or `None` when nothing was sent
/// (view not mounted, or attendance id not in the roster).
pub async fn edit_presence<A: StudentApi>(
    state: &AppState<A>,
    student_id: &str,
    attendance_id: i64,
    presence: Presence,
    ctx: RequestContext,
) -> Option<JoinHandle<()>> {
    let write = {
        let mut views = state.views.lock().await;
        views
            .get_mut(student_id)
            .and_then(|view| view.edit_presence(attendance_id, presence))
    };

    match write {
        Some(write) => Some(dispatch(state.clone(), write, ctx)),
        None => {
            tracing::debug!(
                "Ignoring edit of unknown attendance {} for student {}",
                attendance_id,
                student_id
            );
            None
        }
    }
}

/// Re-sends an out-of-sync row.
pub async fn retry<A: StudentApi>(
    state: &AppState<A>,
    student_id: &str,
    attendance_id: i64,
    ctx: RequestContext,
) -> Option<JoinHandle<()>> {
    let write = {
        let mut views = state.views.lock().await;
        views.get_mut(student_id).and_then(|view| view.retry(attendance_id))
    }?;

    tracing::info!("Retrying attendance {} for student {}", attendance_id, student_id);
    Some(dispatch(state.clone(), write, ctx))
}

/// Drops a failed edit locally. Nothing is sent.
pub async fn revert<A: StudentApi>(state: &AppState<A>, student_id: &str, attendance_id: i64) -> bool {
    let mut views = state.views.lock().await;
    let reverted = views
        .get_mut(student_id)
        .is_some_and(|view| view.revert(attendance_id));
    if reverted {
        tracing::info!("Reverted attendance {} for student {}", attendance_id, student_id);
    }
    reverted
}

// Writes are independent tasks: no queue, no de-duplication. Ordering
// between them is settled by the view's write numbers.
fn dispatch<A: StudentApi>(
    state: AppState<A>,
    write: PendingWrite,
    ctx: RequestContext,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = state
            .api
            .update_presence(&write.student_id, &write.update, &ctx)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "Write {} (attendance {} -> {}) failed: {}",
                    write.write,
                    write.update.id,
                    write.update.presence.code(),
                    e
                );
                e.to_string()
            });

        let mut views = state.views.lock().await;
        match views.get_untouched_mut(&write.student_id) {
            Some(view) => {
                if !view.complete_write(&write, result) {
                    tracing::debug!("Write {} superseded, result dropped", write.write);
                }
            }
            None => tracing::debug!("View for {} gone before write {} finished", write.student_id, write.write),
        }
    })
}
