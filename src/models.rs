use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// 建议状态（纯描述性标签，没有状态迁移）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Status {
    #[default]
    New,
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    /// 徽章上显示的文字（连字符换成空格）
    pub fn label(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::InProgress => "in progress",
            Status::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Status {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(Status::New),
            "in-progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// 排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SortKey {
    #[default]
    Votes,
    Recent,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Votes => "votes",
            SortKey::Recent => "recent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Votes => "Most Voted",
            SortKey::Recent => "Most Recent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortKey::Votes => SortKey::Recent,
            SortKey::Recent => SortKey::Votes,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for SortKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "votes" => Ok(SortKey::Votes),
            "recent" => Ok(SortKey::Recent),
            _ => Err(Error::InvalidSortKey(s.to_string())),
        }
    }
}

/// 评论（只读）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u32,
    pub text: String,
    pub author: String,
}

/// 功能建议
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub votes: u32,
    pub status: Status,
    pub comments: Vec<Comment>,
}

/// 正在编写、尚未提交的建议
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

impl Draft {
    #[allow(dead_code)]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// 只检查是否为空，不做 trim
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}

/// 草稿的局部更新，只合并给出的字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl DraftPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
        }
    }
}

/// 启动时从配置载入的评论
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSeed {
    pub text: String,
    pub author: String,
}

/// 启动时从配置载入的建议（ID 按位置分配）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSeed {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub votes: u32,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub comments: Vec<CommentSeed>,
}

/// 新建议的 ID = 当前数量 + 1，超出 u32 范围时饱和
fn next_id(len: usize) -> u32 {
    u32::try_from(len).map_or(u32::MAX, |n| n.saturating_add(1))
}

/// 建议仓库：建议列表 + 排序字段 + 草稿
#[derive(Debug, Clone, Default)]
pub struct SuggestionStore {
    suggestions: Vec<Suggestion>,
    sort_key: SortKey,
    draft: Draft,
}

impl SuggestionStore {
    pub fn new(sort_key: SortKey) -> Self {
        Self {
            suggestions: Vec::new(),
            sort_key,
            draft: Draft::default(),
        }
    }

    /// 用种子数据构建仓库，ID 依次为 1..=n
    pub fn seeded(sort_key: SortKey, seeds: impl IntoIterator<Item = SuggestionSeed>) -> Self {
        let suggestions = seeds
            .into_iter()
            .zip(1u32..)
            .map(|(seed, id)| Suggestion {
                id,
                title: seed.title,
                description: seed.description,
                votes: seed.votes,
                status: seed.status,
                comments: seed
                    .comments
                    .into_iter()
                    .zip(1u32..)
                    .map(|(c, cid)| Comment {
                        id: cid,
                        text: c.text,
                        author: c.author,
                    })
                    .collect(),
            })
            .collect();

        Self {
            suggestions,
            sort_key,
            draft: Draft::default(),
        }
    }

    /// 基础顺序（插入顺序）
    #[allow(dead_code)]
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn get(&self, id: u32) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// 添加建议
    ///
    /// 标题或描述为空时静默忽略，返回 `None`。
    /// 新 ID = 当前数量 + 1；没有删除操作，所以不会冲突。
    /// 成功后清空草稿。
    pub fn add_suggestion(&mut self, draft: Draft) -> Option<u32> {
        if !draft.is_complete() {
            debug!(
                title_empty = draft.title.is_empty(),
                description_empty = draft.description.is_empty(),
                "ignoring incomplete suggestion"
            );
            return None;
        }

        let id = next_id(self.suggestions.len());
        self.suggestions.push(Suggestion {
            id,
            title: draft.title,
            description: draft.description,
            votes: 0,
            status: Status::New,
            comments: Vec::new(),
        });
        self.draft = Draft::default();
        info!(id, "suggestion added");
        Some(id)
    }

    /// 提交当前草稿
    pub fn submit_draft(&mut self) -> Option<u32> {
        let draft = self.draft.clone();
        self.add_suggestion(draft)
    }

    /// 投票 +1，找不到 ID 时什么也不做
    pub fn upvote(&mut self, id: u32) -> bool {
        match self.suggestions.iter_mut().find(|s| s.id == id) {
            Some(suggestion) => {
                suggestion.votes = suggestion.votes.saturating_add(1);
                debug!(id, votes = suggestion.votes, "upvoted");
                true
            }
            None => {
                debug!(id, "upvote for unknown suggestion ignored");
                false
            }
        }
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        if self.sort_key != key {
            debug!(from = %self.sort_key, to = %key, "sort key changed");
        }
        self.sort_key = key;
    }

    pub fn update_draft(&mut self, patch: DraftPatch) {
        if let Some(title) = patch.title {
            self.draft.title = title;
        }
        if let Some(description) = patch.description {
            self.draft.description = description;
        }
    }

    /// 派生视图：排好序的新序列，不改动底层顺序
    ///
    /// 票数相同时保持插入顺序（稳定排序）。
    pub fn sorted_suggestions(&self) -> Vec<&Suggestion> {
        let mut view: Vec<&Suggestion> = self.suggestions.iter().collect();
        match self.sort_key {
            SortKey::Votes => view.sort_by(|a, b| b.votes.cmp(&a.votes)),
            SortKey::Recent => view.sort_by(|a, b| b.id.cmp(&a.id)),
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(title: &str, votes: u32) -> SuggestionSeed {
        SuggestionSeed {
            title: title.to_string(),
            description: format!("{} description", title),
            votes,
            status: Status::New,
            comments: Vec::new(),
        }
    }

    fn two_item_store() -> SuggestionStore {
        SuggestionStore::seeded(
            SortKey::Votes,
            vec![seed("Dark Mode Support", 15), seed("Mobile App", 10)],
        )
    }

    #[test]
    fn test_add_suggestion() {
        let mut store = two_item_store();
        let id = store.add_suggestion(Draft::new("X", "Y"));

        assert_eq!(id, Some(3));
        assert_eq!(store.len(), 3);
        let added = store.get(3).unwrap();
        assert_eq!(added.title, "X");
        assert_eq!(added.description, "Y");
        assert_eq!(added.votes, 0);
        assert_eq!(added.status, Status::New);
        assert!(added.comments.is_empty());
    }

    #[test]
    fn test_next_id_saturates() {
        assert_eq!(next_id(0), 1);
        assert_eq!(next_id(2), 3);
        assert_eq!(next_id(u32::MAX as usize - 1), u32::MAX);
        assert_eq!(next_id(u32::MAX as usize), u32::MAX);
        assert_eq!(next_id(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let mut store = two_item_store();
        assert_eq!(store.add_suggestion(Draft::new("", "Y")), None);
        assert_eq!(store.add_suggestion(Draft::new("X", "")), None);
        assert_eq!(store.add_suggestion(Draft::default()), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_accepts_whitespace() {
        let mut store = SuggestionStore::new(SortKey::Votes);
        assert_eq!(store.add_suggestion(Draft::new(" ", "\t")), Some(1));
        assert_eq!(store.get(1).unwrap().title, " ");
    }

    #[test]
    fn test_submit_draft_clears_only_on_success() {
        let mut store = SuggestionStore::new(SortKey::Votes);
        store.update_draft(DraftPatch::title("Export"));
        assert_eq!(store.submit_draft(), None);
        assert_eq!(store.draft().title, "Export");

        store.update_draft(DraftPatch::description("CSV export"));
        assert_eq!(store.submit_draft(), Some(1));
        assert_eq!(store.draft(), &Draft::default());
        assert_eq!(store.get(1).unwrap().description, "CSV export");
    }

    #[test]
    fn test_update_draft_merges_partial() {
        let mut store = two_item_store();
        let before = store.suggestions().to_vec();

        store.update_draft(DraftPatch::title("A"));
        store.update_draft(DraftPatch::description("B"));
        store.update_draft(DraftPatch::title("C"));

        assert_eq!(store.draft(), &Draft::new("C", "B"));
        assert_eq!(store.suggestions(), before.as_slice());
    }

    #[test]
    fn test_upvote() {
        let mut store = two_item_store();
        for _ in 0..3 {
            assert!(store.upvote(2));
        }

        assert_eq!(store.get(2).unwrap().votes, 13);
        assert_eq!(store.get(1).unwrap().votes, 15);

        let order: Vec<(u32, u32)> = store
            .sorted_suggestions()
            .iter()
            .map(|s| (s.id, s.votes))
            .collect();
        assert_eq!(order, vec![(1, 15), (2, 13)]);
    }

    #[test]
    fn test_upvote_unknown_is_noop() {
        let mut store = two_item_store();
        let before = store.suggestions().to_vec();
        assert!(!store.upvote(42));
        assert_eq!(store.suggestions(), before.as_slice());
    }

    #[test]
    fn test_upvote_saturates() {
        let mut store = SuggestionStore::seeded(SortKey::Votes, vec![seed("Max", u32::MAX)]);
        store.upvote(1);
        assert_eq!(store.get(1).unwrap().votes, u32::MAX);
    }

    #[test]
    fn test_sorted_by_votes_is_non_increasing() {
        let mut store = SuggestionStore::seeded(
            SortKey::Votes,
            vec![seed("a", 3), seed("b", 9), seed("c", 0), seed("d", 9), seed("e", 5)],
        );
        store.add_suggestion(Draft::new("f", "f"));

        let view = store.sorted_suggestions();
        assert!(view.windows(2).all(|w| w[0].votes >= w[1].votes));
        // 同票保持插入顺序
        let ids: Vec<u32> = view.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 4, 5, 1, 3, 6]);
    }

    #[test]
    fn test_sorted_by_recent() {
        let mut store = two_item_store();
        store.add_suggestion(Draft::new("X", "Y"));
        store.set_sort_key(SortKey::Recent);

        let ids: Vec<u32> = store.sorted_suggestions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_sorted_view_keeps_base_order() {
        let mut store = two_item_store();
        for _ in 0..6 {
            store.upvote(2);
        }
        let _ = store.sorted_suggestions();

        let ids: Vec<u32> = store.suggestions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.sorted_suggestions()[0].id, 2);
    }

    #[test]
    fn test_seeded_assigns_positional_ids() {
        let mut s = seed("With comments", 1);
        s.comments = vec![
            CommentSeed {
                text: "first".into(),
                author: "User1".into(),
            },
            CommentSeed {
                text: "second".into(),
                author: "User2".into(),
            },
        ];
        let store = SuggestionStore::seeded(SortKey::Recent, vec![seed("a", 0), s]);

        let ids: Vec<u32> = store.suggestions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let comment_ids: Vec<u32> = store.get(2).unwrap().comments.iter().map(|c| c.id).collect();
        assert_eq!(comment_ids, vec![1, 2]);
        assert_eq!(store.sort_key(), SortKey::Recent);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("votes".parse::<SortKey>().unwrap(), SortKey::Votes);
        assert_eq!("recent".parse::<SortKey>().unwrap(), SortKey::Recent);
        assert!(matches!(
            "Recent".parse::<SortKey>(),
            Err(Error::InvalidSortKey(_))
        ));
        assert!(matches!(
            "newest".parse::<SortKey>(),
            Err(Error::InvalidSortKey(_))
        ));

        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!(Status::InProgress.label(), "in progress");
        assert!("In-Progress".parse::<Status>().is_err());
        assert!(matches!(
            "done".parse::<Status>(),
            Err(Error::InvalidStatus(_))
        ));
        assert_eq!(SortKey::Votes.next(), SortKey::Recent);
        assert_eq!(SortKey::Recent.next(), SortKey::Votes);
    }
}
