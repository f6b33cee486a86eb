//! Tests for the registry and navigator

use super::*;
use crate::cursor::CursorConfig;
use crate::feed::testing::{page, Reply, ScriptedFetcher};
use crate::feed::{Category, Item};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

fn item(n: usize) -> Item {
    Item::new(
        format!("id{n}"),
        format!("description{n}"),
        format!("gifUrl{n}"),
    )
}

fn navigator_with(fetcher: Arc<ScriptedFetcher>) -> Navigator {
    let registry = FeedRegistry::new(fetcher, CursorConfig::default());
    Navigator::new(registry, Category::Latest)
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_registry_has_a_cursor_per_category() {
    let registry = FeedRegistry::new(
        Arc::new(ScriptedFetcher::default()),
        CursorConfig::default(),
    );

    let mut categories: Vec<Category> = registry.categories().collect();
    categories.sort_by_key(|c| c.path_segment());
    assert_eq!(categories, vec![Category::Hot, Category::Latest, Category::Top]);

    for category in Category::ALL {
        let cursor = registry.cursor(category);
        assert_eq!(cursor.try_lock().unwrap().category(), category);
    }
}

#[tokio::test]
async fn test_registry_cursors_are_independent() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![page(0..3)]));
    let registry = FeedRegistry::new(fetcher.clone(), CursorConfig::default());

    {
        let latest = registry.cursor(Category::Latest);
        let mut latest = latest.lock().await;
        latest.current().await.unwrap();
        latest.advance().await.unwrap();
    }

    let hot = registry.cursor(Category::Hot);
    let mut hot = hot.lock().await;
    assert!(hot.is_empty());
    assert_eq!(hot.current().await.unwrap(), item(0));

    assert_eq!(
        fetcher.calls(),
        vec![(Category::Latest, 0), (Category::Hot, 0)]
    );
    let latest = registry.cursor(Category::Latest);
    assert_eq!(latest.lock().await.current_index(), Some(1));
}

// ============================================================================
// Navigator Tests
// ============================================================================

#[tokio::test]
async fn test_navigator_starts_idle() {
    let navigator = navigator_with(Arc::new(ScriptedFetcher::default()));

    assert_eq!(navigator.view(), ViewState::Idle);
    assert_eq!(navigator.category(), Category::Latest);
    assert!(!navigator.can_go_back());
}

#[tokio::test]
async fn test_navigator_forward_and_back() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![page(0..5)]));
    let mut navigator = navigator_with(fetcher.clone());

    navigator.show_current();
    assert_eq!(navigator.view(), ViewState::Loading);
    navigator.settle().await;
    assert_eq!(
        navigator.view(),
        ViewState::Showing {
            item: item(0),
            can_go_back: false
        }
    );

    navigator.forward();
    navigator.settle().await;
    assert_eq!(
        navigator.view(),
        ViewState::Showing {
            item: item(1),
            can_go_back: true
        }
    );
    assert!(navigator.can_go_back());

    navigator.back();
    navigator.settle().await;
    assert_eq!(navigator.view().item(), Some(&item(0)));
    assert!(!navigator.can_go_back());
    assert_eq!(fetcher.pages(), vec![0]);
}

#[tokio::test]
async fn test_navigator_back_on_fresh_cursor_fails() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let mut navigator = navigator_with(fetcher.clone());

    navigator.back();
    navigator.settle().await;

    assert_eq!(
        navigator.view(),
        ViewState::Failed {
            message: "can't show previous".to_string(),
            retryable: false,
            can_go_back: false
        }
    );
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_navigator_reload_after_failure() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        Reply::Fail("test error message".into()),
        page(0..2),
    ]));
    let mut navigator = navigator_with(fetcher.clone());

    navigator.show_current();
    navigator.settle().await;
    let view = navigator.view();
    assert!(view.is_failed());
    if let ViewState::Failed { message, .. } = view {
        assert!(message.contains("test error message"));
        assert!(message.contains("page 0"));
    }

    navigator.reload();
    navigator.settle().await;
    assert_eq!(navigator.view().item(), Some(&item(0)));
    assert_eq!(fetcher.pages(), vec![0, 0]);
}

#[tokio::test]
async fn test_navigator_select_switches_cursor() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![page(0..2), page(10..12)]));
    let mut navigator = navigator_with(fetcher.clone());

    navigator.select(Category::Latest);
    navigator.settle().await;
    navigator.forward();
    navigator.settle().await;
    assert_eq!(navigator.view().item(), Some(&item(1)));

    navigator.select(Category::Top);
    navigator.settle().await;
    assert_eq!(navigator.category(), Category::Top);
    assert_eq!(navigator.view().item(), Some(&item(10)));
    assert!(!navigator.can_go_back());

    // coming back resumes where the category was left
    navigator.select(Category::Latest);
    navigator.settle().await;
    assert_eq!(navigator.view().item(), Some(&item(1)));
    assert!(navigator.can_go_back());

    assert_eq!(
        fetcher.calls(),
        vec![(Category::Latest, 0), (Category::Top, 0)]
    );
}

#[tokio::test]
async fn test_new_request_supersedes_in_flight_fetch() {
    let gate = Arc::new(Semaphore::new(0));
    let fetcher = Arc::new(ScriptedFetcher::gated(vec![page(0..3)], gate.clone()));
    let mut navigator = navigator_with(fetcher.clone());

    navigator.select(Category::Latest);
    tokio::time::sleep(Duration::from_millis(20)).await;
    navigator.select(Category::Hot);
    tokio::time::sleep(Duration::from_millis(20)).await;

    gate.add_permits(1);
    navigator.settle().await;

    assert_eq!(
        navigator.view(),
        ViewState::Showing {
            item: item(0),
            can_go_back: false
        }
    );
    assert_eq!(
        fetcher.calls(),
        vec![(Category::Latest, 0), (Category::Hot, 0)]
    );

    let latest = navigator.registry().cursor(Category::Latest);
    let latest = latest.lock().await;
    assert!(latest.is_empty());
    assert_eq!(latest.last_fetched_page(), None);
}

#[tokio::test]
async fn test_back_supersedes_pending_forward() {
    let gate = Arc::new(Semaphore::new(1));
    let fetcher = Arc::new(ScriptedFetcher::gated(
        vec![page(0..1), page(1..2)],
        gate.clone(),
    ));
    let mut navigator = navigator_with(fetcher.clone());

    navigator.show_current();
    navigator.settle().await;

    navigator.forward();
    tokio::time::sleep(Duration::from_millis(20)).await;
    navigator.back();
    navigator.settle().await;

    assert!(matches!(navigator.view(), ViewState::Failed { .. }));
    {
        let cursor = navigator.registry().cursor(Category::Latest);
        let cursor = cursor.lock().await;
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor.current_index(), Some(0));
        assert_eq!(cursor.last_fetched_page(), Some(0));
    }

    gate.add_permits(1);
    navigator.forward();
    navigator.settle().await;
    assert_eq!(navigator.view().item(), Some(&item(1)));
    assert_eq!(fetcher.pages(), vec![0, 1, 1]);
}

#[tokio::test]
async fn test_cancel_discards_pending_result() {
    let gate = Arc::new(Semaphore::new(0));
    let fetcher = Arc::new(ScriptedFetcher::gated(vec![page(0..1)], gate.clone()));
    let mut navigator = navigator_with(fetcher.clone());
    let mut updates = navigator.subscribe();

    navigator.show_current();
    assert!(updates.has_changed().unwrap());
    assert_eq!(*updates.borrow_and_update(), ViewState::Loading);

    tokio::time::sleep(Duration::from_millis(20)).await;
    navigator.cancel();
    assert!(updates.has_changed().unwrap());
    assert_eq!(*updates.borrow_and_update(), ViewState::Idle);

    gate.add_permits(1);
    navigator.settle().await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(navigator.view(), ViewState::Idle);
    assert!(!updates.has_changed().unwrap());
    let cursor = navigator.registry().cursor(Category::Latest);
    assert!(cursor.lock().await.is_empty());
}

#[tokio::test]
async fn test_cancel_restores_last_shown_item() {
    let gate = Arc::new(Semaphore::new(1));
    let fetcher = Arc::new(ScriptedFetcher::gated(
        vec![page(0..1), page(1..2)],
        gate.clone(),
    ));
    let mut navigator = navigator_with(fetcher.clone());

    navigator.show_current();
    navigator.settle().await;
    let shown = navigator.view();
    assert_eq!(shown.item(), Some(&item(0)));

    navigator.forward();
    assert_eq!(navigator.view(), ViewState::Loading);
    tokio::time::sleep(Duration::from_millis(20)).await;
    navigator.cancel();
    assert_eq!(navigator.view(), shown);

    gate.add_permits(1);
    navigator.settle().await;
    assert_eq!(navigator.view(), shown);
    assert_eq!(fetcher.pages(), vec![0, 1]);

    let cursor = navigator.registry().cursor(Category::Latest);
    assert_eq!(cursor.lock().await.len(), 1);
}

#[tokio::test]
async fn test_cancel_without_request_keeps_view() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![page(0..2)]));
    let mut navigator = navigator_with(fetcher);

    navigator.show_current();
    navigator.settle().await;
    let shown = navigator.view();
    let updates = navigator.subscribe();

    navigator.cancel();
    assert_eq!(navigator.view(), shown);
    assert!(!updates.has_changed().unwrap());
}
