//! Change feed and live queries.
//!
//! Every committed write in a repository publishes one [`Change`]. A
//! [`LiveQuery`] subscribes to the feed, and each time a change matching its
//! [`Watch`] arrives it re-runs its query and yields the fresh result.
//! Dropping a live query drops its receiver, which is all deregistration
//! amounts to.

use futures::future::BoxFuture;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tracing::{trace, warn};
use uuid::Uuid;

use crate::error::RepoResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Modules,
    Flashcards,
    MultipleChoiceQuestions,
    Quizzes,
    QuizQuestions,
    Resources,
    Badges,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

/// A committed write.
///
/// `parent` is the foreign key the record is listed under (`module_id` for
/// flashcards, `quiz_id` for quiz questions, ...), `None` for top level tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub table: Table,
    pub kind: ChangeKind,
    pub id: Uuid,
    pub parent: Option<Uuid>,
}

impl Change {
    pub fn new(table: Table, kind: ChangeKind, id: impl Into<Uuid>) -> Self {
        Self {
            table,
            kind,
            id: id.into(),
            parent: None,
        }
    }

    pub fn under(mut self, parent: impl Into<Uuid>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// The key range a live query depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Watch {
    /// Any write to the table.
    Table(Table),
    /// Writes to records listed under `parent`.
    Children { table: Table, parent: Uuid },
    /// Writes to one record.
    Record { table: Table, id: Uuid },
}

impl Watch {
    pub fn matches(&self, change: &Change) -> bool {
        match *self {
            Watch::Table(table) => change.table == table,
            Watch::Children { table, parent } => {
                change.table == table && change.parent == Some(parent)
            }
            Watch::Record { table, id } => change.table == table && change.id == id,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChangeFeed {
    tx: broadcast::Sender<Change>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, change: Change) {
        // Err only means nobody is watching right now.
        if self.tx.send(change).is_err() {
            trace!(?change, "no live queries registered");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Change> {
        self.tx.subscribe()
    }

    pub fn watchers(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Registers a live query. The subscription starts now, so writes that land
    /// between this call and the first `next()` are not lost.
    pub fn watch<T, F>(&self, watch: Watch, fetch: F) -> LiveQuery<T>
    where
        F: Fn() -> BoxFuture<'static, RepoResult<T>> + Send + Sync + 'static,
    {
        LiveQuery {
            watch,
            rx: self.subscribe(),
            fetch: Box::new(fetch),
            primed: false,
            dirty: false,
        }
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

type Fetch<T> = Box<dyn Fn() -> BoxFuture<'static, RepoResult<T>> + Send + Sync>;

pub struct LiveQuery<T> {
    watch: Watch,
    rx: broadcast::Receiver<Change>,
    fetch: Fetch<T>,
    primed: bool,
    /// A matching change was consumed but its refetch has not completed yet.
    dirty: bool,
}

impl<T> LiveQuery<T> {
    pub fn watch(&self) -> Watch {
        self.watch
    }

    /// Resolves immediately with the current result on the first call. Later
    /// calls wait for a matching change, then re-run the query.
    ///
    /// Returns `None` once the feed is gone.
    ///
    /// Cancel safe: if the future is dropped mid-fetch, the next call fetches
    /// again instead of waiting for another change.
    pub async fn next(&mut self) -> Option<RepoResult<T>> {
        if self.primed && !self.dirty {
            self.wait_for_change().await?;
            self.dirty = true;
        }
        let result = (self.fetch)().await;
        self.primed = true;
        self.dirty = false;
        Some(result)
    }

    async fn wait_for_change(&mut self) -> Option<()> {
        loop {
            match self.rx.recv().await {
                Ok(change) if self.watch.matches(&change) => break,
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(watch = ?self.watch, skipped, "live query lagged, refetching");
                    break;
                }
                Err(RecvError::Closed) => return None,
            }
        }

        // One refetch covers everything already queued.
        loop {
            match self.rx.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use std::time::Duration;

    fn counting_query(feed: &ChangeFeed, watch: Watch) -> (LiveQuery<usize>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let query = feed.watch(watch, move || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }.boxed()
        });
        (query, calls)
    }

    #[test]
    fn children_watch_only_matches_its_parent() {
        let parent = Uuid::now_v7();
        let watch = Watch::Children {
            table: Table::Flashcards,
            parent,
        };

        let inside = Change::new(Table::Flashcards, ChangeKind::Inserted, Uuid::now_v7()).under(parent);
        let other_parent =
            Change::new(Table::Flashcards, ChangeKind::Inserted, Uuid::now_v7()).under(Uuid::now_v7());
        let other_table =
            Change::new(Table::MultipleChoiceQuestions, ChangeKind::Inserted, Uuid::now_v7())
                .under(parent);

        assert!(watch.matches(&inside));
        assert!(!watch.matches(&other_parent));
        assert!(!watch.matches(&other_table));
    }

    #[test]
    fn record_watch_matches_by_id() {
        let id = Uuid::now_v7();
        let watch = Watch::Record {
            table: Table::Modules,
            id,
        };
        assert!(watch.matches(&Change::new(Table::Modules, ChangeKind::Deleted, id)));
        assert!(!watch.matches(&Change::new(Table::Modules, ChangeKind::Deleted, Uuid::now_v7())));
    }

    #[tokio::test]
    async fn first_next_returns_snapshot_without_waiting() {
        let feed = ChangeFeed::default();
        let (mut query, _) = counting_query(&feed, Watch::Table(Table::Badges));

        let first = tokio::time::timeout(Duration::from_millis(100), query.next())
            .await
            .expect("snapshot should not wait");
        assert_eq!(first.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn unrelated_changes_do_not_refetch() {
        let feed = ChangeFeed::default();
        let (mut query, calls) = counting_query(&feed, Watch::Table(Table::Badges));
        query.next().await.unwrap().unwrap();

        feed.publish(Change::new(Table::Resources, ChangeKind::Inserted, Uuid::now_v7()));

        let waited = tokio::time::timeout(Duration::from_millis(50), query.next()).await;
        assert!(waited.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn queued_changes_collapse_into_one_refetch() {
        let feed = ChangeFeed::default();
        let (mut query, calls) = counting_query(&feed, Watch::Table(Table::Badges));
        query.next().await.unwrap().unwrap();

        for _ in 0..5 {
            feed.publish(Change::new(Table::Badges, ChangeKind::Inserted, Uuid::now_v7()));
        }

        assert_eq!(query.next().await.unwrap().unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn lagging_query_still_refetches() {
        let feed = ChangeFeed::new(2);
        let (mut query, _) = counting_query(&feed, Watch::Table(Table::Quizzes));
        query.next().await.unwrap().unwrap();

        for _ in 0..10 {
            feed.publish(Change::new(Table::Quizzes, ChangeKind::Updated, Uuid::now_v7()));
        }

        assert_eq!(query.next().await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn cancelled_refetch_is_retried() {
        let feed = ChangeFeed::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut query = feed.watch(Watch::Table(Table::Badges), move || {
            let counter = counter.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
            }
            .boxed()
        });
        assert_eq!(query.next().await.unwrap().unwrap(), 1);

        feed.publish(Change::new(Table::Badges, ChangeKind::Updated, Uuid::now_v7()));

        // Give up while the refetch is still sleeping.
        let cancelled = tokio::time::timeout(Duration::from_millis(30), query.next()).await;
        assert!(cancelled.is_err());

        let retried = tokio::time::timeout(Duration::from_millis(500), query.next())
            .await
            .expect("pending change must still be delivered");
        assert!(retried.unwrap().unwrap() >= 2);
    }

    #[tokio::test]
    async fn cancelled_first_fetch_still_returns_snapshot() {
        let feed = ChangeFeed::default();
        let mut query = feed.watch(Watch::Table(Table::Badges), || {
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(7usize)
            }
            .boxed()
        });

        assert!(tokio::time::timeout(Duration::from_millis(10), query.next()).await.is_err());

        let snapshot = tokio::time::timeout(Duration::from_millis(500), query.next())
            .await
            .expect("snapshot must not wait for a change");
        assert_eq!(snapshot.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn dropping_query_deregisters() {
        let feed = ChangeFeed::default();
        let (query, _) = counting_query(&feed, Watch::Table(Table::Modules));
        assert_eq!(feed.watchers(), 1);

        drop(query);
        assert_eq!(feed.watchers(), 0);
    }

    #[tokio::test]
    async fn closed_feed_ends_query() {
        let feed = ChangeFeed::default();
        let (mut query, _) = counting_query(&feed, Watch::Table(Table::Modules));
        query.next().await.unwrap().unwrap();

        drop(feed);
        assert!(query.next().await.is_none());
    }
}
