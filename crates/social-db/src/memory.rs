//! In-memory implementation of every repository port plus [`FileStore`]
//!
//! Backs the service-layer tests and local experiments without PostgreSQL.
//! Semantics mirror the SQL repositories: soft-deleted rows are invisible to
//! finders, unique constraints raise the same domain errors, and the reaction
//! toggle is atomic under a single lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use social_core::entities::{
    AttachmentRef, Chatroom, Comment, Feed, FileUpload, Follow, Message, Reaction,
    ReactionCounts, ReactionOutcome, ReactionTransition, User,
};
use social_core::error::DomainError;
use social_core::traits::{
    ChatroomRepository, CommentRepository, FeedQuery, FeedRepository, FileStore,
    FollowRepository, MessageQuery, MessageRepository, ReactionRepository, RepoResult,
    UserRepository,
};
use social_core::value_objects::Snowflake;

/// A stored value plus its soft-delete flag
#[derive(Debug, Clone)]
struct Row<T> {
    value: T,
    deleted: bool,
}

impl<T> Row<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            deleted: false,
        }
    }

    fn live(&self) -> Option<&T> {
        (!self.deleted).then_some(&self.value)
    }
}

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<Snowflake, Row<StoredUser>>,
    follows: Vec<Follow>,
    feeds: BTreeMap<Snowflake, Row<Feed>>,
    comments: BTreeMap<Snowflake, Row<Comment>>,
    reactions: Vec<Reaction>,
    chatrooms: BTreeMap<Snowflake, Row<Chatroom>>,
    /// (room, user) in join order
    members: Vec<(Snowflake, Snowflake)>,
    messages: BTreeMap<Snowflake, Row<Message>>,
    files: HashMap<String, Vec<u8>>,
}

impl State {
    fn live_user(&self, id: Snowflake) -> Option<&User> {
        self.users.get(&id).and_then(Row::live).map(|s| &s.user)
    }

    /// Unique checks span deactivated accounts, like the table constraints
    fn check_user_unique(&self, user: &User) -> RepoResult<()> {
        let others = self.users.values().filter(|row| row.value.user.id != user.id);
        for row in others {
            if row.value.user.email == user.email {
                return Err(DomainError::EmailAlreadyExists);
            }
            if row.value.user.username == user.username {
                return Err(DomainError::UsernameAlreadyExists);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    file_seq: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently held by the file store
    pub fn file_count(&self) -> usize {
        self.state.lock().files.len()
    }

    pub fn has_file(&self, reference: &AttachmentRef) -> bool {
        self.state.lock().files.contains_key(reference.as_str())
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.lock().live_user(id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        let live = || state.users.values().filter_map(Row::live);

        Ok(live()
            .find(|s| s.user.email == login)
            .or_else(|| live().find(|s| s.user.username == login))
            .map(|s| s.user.clone()))
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .values()
            .filter_map(Row::live)
            .map(|s| s.user.clone())
            .collect())
    }

    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .iter()
            .filter(|(id, _)| ids.contains(id))
            .filter_map(|(_, row)| row.live())
            .map(|s| s.user.clone())
            .collect())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let state = self.state.lock();
        Ok(state.users.values().any(|row| row.value.user.email == email))
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let state = self.state.lock();
        Ok(state
            .users
            .values()
            .any(|row| row.value.user.username == username))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.check_user_unique(user)?;
        state.users.insert(
            user.id,
            Row::new(StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_string(),
            }),
        );
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.live_user(user.id).is_none() {
            return Err(DomainError::UserNotFound(user.id));
        }
        state.check_user_unique(user)?;
        if let Some(row) = state.users.get_mut(&user.id) {
            row.value.user = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.users.get_mut(&id) {
            Some(row) if !row.deleted => {
                row.deleted = true;
                Ok(())
            }
            _ => Err(DomainError::UserNotFound(id)),
        }
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let state = self.state.lock();
        Ok(state
            .users
            .get(&id)
            .and_then(Row::live)
            .map(|s| s.password_hash.clone()))
    }

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.users.get_mut(&id) {
            Some(row) if !row.deleted => {
                row.value.password_hash = password_hash.to_string();
                Ok(())
            }
            _ => Err(DomainError::UserNotFound(id)),
        }
    }
}

// ============================================================================
// Follows
// ============================================================================

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn create(&self, follow: &Follow) -> RepoResult<()> {
        let mut state = self.state.lock();
        let exists = state.follows.iter().any(|f| {
            f.follower_id == follow.follower_id && f.followed_id == follow.followed_id
        });
        if exists {
            return Err(DomainError::AlreadyFollowing);
        }
        state.follows.push(follow.clone());
        Ok(())
    }

    async fn delete(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let before = state.follows.len();
        state
            .follows
            .retain(|f| !(f.follower_id == follower_id && f.followed_id == followed_id));
        Ok(state.follows.len() < before)
    }

    async fn exists(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool> {
        let state = self.state.lock();
        Ok(state
            .follows
            .iter()
            .any(|f| f.follower_id == follower_id && f.followed_id == followed_id))
    }

    async fn find_followers(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(state
            .follows
            .iter()
            .filter(|f| f.followed_id == user_id)
            .filter_map(|f| state.live_user(f.follower_id).cloned())
            .collect())
    }

    async fn find_following(&self, user_id: Snowflake) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(state
            .follows
            .iter()
            .filter(|f| f.follower_id == user_id)
            .filter_map(|f| state.live_user(f.followed_id).cloned())
            .collect())
    }
}

// ============================================================================
// Feeds, comments, reactions
// ============================================================================

#[async_trait]
impl FeedRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Feed>> {
        let state = self.state.lock();
        Ok(state.feeds.get(&id).and_then(Row::live).cloned())
    }

    async fn list(&self, query: FeedQuery) -> RepoResult<Vec<Feed>> {
        let state = self.state.lock();
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);

        Ok(state
            .feeds
            .iter()
            .rev()
            .filter(|(id, _)| query.before.map_or(true, |before| **id < before))
            .filter_map(|(_, row)| row.live().cloned())
            .take(limit)
            .collect())
    }

    async fn create(&self, feed: &Feed) -> RepoResult<()> {
        self.state.lock().feeds.insert(feed.id, Row::new(feed.clone()));
        Ok(())
    }

    async fn update(&self, feed: &Feed) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.feeds.get_mut(&feed.id) {
            Some(row) if !row.deleted => {
                row.value = feed.clone();
                Ok(())
            }
            _ => Err(DomainError::FeedNotFound(feed.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.feeds.get_mut(&id) {
            Some(row) if !row.deleted => {
                row.deleted = true;
                Ok(())
            }
            _ => Err(DomainError::FeedNotFound(id)),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let state = self.state.lock();
        Ok(state.comments.get(&id).and_then(Row::live).cloned())
    }

    async fn find_by_feeds(&self, feed_ids: &[Snowflake]) -> RepoResult<Vec<Comment>> {
        let state = self.state.lock();
        Ok(state
            .comments
            .values()
            .filter_map(Row::live)
            .filter(|c| feed_ids.contains(&c.feed_id))
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.state
            .lock()
            .comments
            .insert(comment.id, Row::new(comment.clone()));
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.comments.get_mut(&comment.id) {
            Some(row) if !row.deleted => {
                row.value = comment.clone();
                Ok(())
            }
            _ => Err(DomainError::CommentNotFound(comment.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.comments.get_mut(&id) {
            Some(row) if !row.deleted => {
                row.deleted = true;
                Ok(())
            }
            _ => Err(DomainError::CommentNotFound(id)),
        }
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn find(&self, feed_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        let state = self.state.lock();
        Ok(state
            .reactions
            .iter()
            .find(|r| r.feed_id == feed_id && r.user_id == user_id)
            .cloned())
    }

    async fn find_by_feeds(&self, feed_ids: &[Snowflake]) -> RepoResult<Vec<Reaction>> {
        let state = self.state.lock();
        Ok(state
            .reactions
            .iter()
            .filter(|r| feed_ids.contains(&r.feed_id))
            .cloned()
            .collect())
    }

    async fn count_by_feed(&self, feed_id: Snowflake) -> RepoResult<ReactionCounts> {
        let state = self.state.lock();
        Ok(ReactionCounts::tally(
            state.reactions.iter().filter(|r| r.feed_id == feed_id),
        ))
    }

    async fn toggle(&self, proposed: &Reaction) -> RepoResult<ReactionOutcome> {
        let mut state = self.state.lock();
        let position = state
            .reactions
            .iter()
            .position(|r| r.feed_id == proposed.feed_id && r.user_id == proposed.user_id);
        let current = position.map(|i| state.reactions[i].kind);

        let transition = ReactionTransition::resolve(current, proposed.kind);
        match (transition, position) {
            (ReactionTransition::Insert(_), _) | (_, None) => {
                state.reactions.push(proposed.clone());
            }
            (ReactionTransition::Update(kind), Some(i)) => state.reactions[i].kind = kind,
            (ReactionTransition::Delete, Some(i)) => {
                state.reactions.remove(i);
            }
        }

        Ok(transition.outcome(current))
    }
}

// ============================================================================
// Chat
// ============================================================================

#[async_trait]
impl ChatroomRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Chatroom>> {
        let state = self.state.lock();
        Ok(state.chatrooms.get(&id).and_then(Row::live).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Chatroom>> {
        let state = self.state.lock();
        Ok(state
            .chatrooms
            .iter()
            .rev()
            .filter(|(id, _)| state.members.contains(&(**id, user_id)))
            .filter_map(|(_, row)| row.live().cloned())
            .collect())
    }

    async fn create(&self, room: &Chatroom, members: &[Snowflake]) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.chatrooms.insert(room.id, Row::new(room.clone()));
        for user_id in std::iter::once(room.owner_id).chain(members.iter().copied()) {
            if !state.members.contains(&(room.id, user_id)) {
                state.members.push((room.id, user_id));
            }
        }
        Ok(())
    }

    async fn get_members(&self, room_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let state = self.state.lock();
        Ok(state
            .members
            .iter()
            .filter(|(room, _)| *room == room_id)
            .map(|(_, user)| *user)
            .collect())
    }

    async fn is_member(&self, room_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().members.contains(&(room_id, user_id)))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.chatrooms.get_mut(&id) {
            Some(row) if !row.deleted => {
                row.deleted = true;
                Ok(())
            }
            _ => Err(DomainError::ChatroomNotFound(id)),
        }
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let state = self.state.lock();
        Ok(state.messages.get(&id).and_then(Row::live).cloned())
    }

    async fn find_by_chatroom(
        &self,
        chatroom_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let state = self.state.lock();
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);

        let in_room: Vec<Message> = state
            .messages
            .values()
            .filter_map(Row::live)
            .filter(|m| m.chatroom_id == chatroom_id)
            .cloned()
            .collect();

        let page = match (query.before, query.after) {
            (Some(before), None) => {
                let older: Vec<_> = in_room.into_iter().filter(|m| m.id < before).collect();
                let skip = older.len().saturating_sub(limit);
                older.into_iter().skip(skip).collect()
            }
            (None, Some(after)) => in_room
                .into_iter()
                .filter(|m| m.id > after)
                .take(limit)
                .collect(),
            _ => {
                let skip = in_room.len().saturating_sub(limit);
                in_room.into_iter().skip(skip).collect()
            }
        };

        Ok(page)
    }

    async fn create(&self, message: &Message) -> RepoResult<()> {
        self.state
            .lock()
            .messages
            .insert(message.id, Row::new(message.clone()));
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.messages.get_mut(&id) {
            Some(row) if !row.deleted => {
                row.deleted = true;
                Ok(())
            }
            _ => Err(DomainError::MessageNotFound(id)),
        }
    }
}

// ============================================================================
// Files
// ============================================================================

#[async_trait]
impl FileStore for InMemoryStore {
    async fn store(&self, upload: FileUpload) -> RepoResult<AttachmentRef> {
        let seq = self.file_seq.fetch_add(1, Ordering::Relaxed);
        let reference = format!("memory/{seq}_{}", upload.sanitized_file_name());
        self.state.lock().files.insert(reference.clone(), upload.data);
        Ok(AttachmentRef::new(reference))
    }

    async fn remove(&self, reference: &AttachmentRef) -> RepoResult<()> {
        self.state.lock().files.remove(reference.as_str());
        Ok(())
    }
}
