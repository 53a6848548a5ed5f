use crate::error::PollError;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeed {
    pub title: String,
    pub description: String,
    pub entries: Vec<ParsedEntry>,
}

/// One item as published by the source feed. Carries no identity yet; the
/// merge engine assigns one on first sight.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Parses raw feed text into its structured form.
///
/// Items without a `<link>` are dropped: the link is the entry's only
/// stable identity and cannot be invented here.
pub fn parse_feed(raw: &str) -> Result<ParsedFeed, PollError> {
    let channel = rss::Channel::read_from(raw.as_bytes())?;

    let entries = channel
        .items()
        .iter()
        .filter_map(|item| {
            let link = item.link()?;
            Some(ParsedEntry {
                title: item.title().unwrap_or_default().to_owned(),
                link: link.to_owned(),
                description: item.description().unwrap_or_default().to_owned(),
            })
        })
        .collect();

    Ok(ParsedFeed {
        title: channel.title().to_owned(),
        description: channel.description().to_owned(),
        entries,
    })
}
