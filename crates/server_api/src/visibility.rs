use shared::{
    domain::{ClientId, ProjectQuery, ProjectRecord, ProjectTag},
    protocol::TagCounts,
};

/// Records whose allow-list contains `identity`. The admin identity gets
/// everything only because the catalogue lists it on every record.
pub fn visible_projects<'a>(
    identity: &ClientId,
    projects: &'a [ProjectRecord],
) -> Vec<&'a ProjectRecord> {
    projects
        .iter()
        .filter(|project| project.is_visible_to(identity))
        .collect()
}

pub fn filter_projects<'a>(
    identity: &ClientId,
    projects: &'a [ProjectRecord],
    query: &ProjectQuery,
) -> Vec<&'a ProjectRecord> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|needle| !needle.is_empty())
        .map(str::to_lowercase);

    visible_projects(identity, projects)
        .into_iter()
        .filter(|project| query.tag.matches(project.tag))
        .filter(|project| match &needle {
            Some(needle) => matches_search(project, needle),
            None => true,
        })
        .collect()
}

pub fn tag_counts<'a>(projects: impl IntoIterator<Item = &'a ProjectRecord>) -> TagCounts {
    let mut counts = TagCounts {
        all: 0,
        proposal: 0,
        merchandise: 0,
        internal: 0,
        briefing: 0,
    };
    for project in projects {
        counts.all += 1;
        match project.tag {
            ProjectTag::Proposal => counts.proposal += 1,
            ProjectTag::Merchandise => counts.merchandise += 1,
            ProjectTag::Internal => counts.internal += 1,
            ProjectTag::Briefing => counts.briefing += 1,
        }
    }
    counts
}

fn matches_search(project: &ProjectRecord, needle: &str) -> bool {
    [&project.title, &project.description, &project.client]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(needle))
}

#[cfg(test)]
#[path = "tests/visibility_tests.rs"]
mod tests;
