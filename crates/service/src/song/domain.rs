/// Exact-match listing filter. `None` means the column is not filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub title: Option<String>,
}

impl SongFilter {
    /// Build from raw query values; empty strings mean "no filter".
    pub fn new(group: &str, title: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self { group: non_empty(group), title: non_empty(title) }
    }

    pub fn matches(&self, song: &models::song::Model) -> bool {
        self.group.as_deref().map_or(true, |g| song.group_name == g)
            && self.title.as_deref().map_or(true, |t| song.title == t)
    }
}
