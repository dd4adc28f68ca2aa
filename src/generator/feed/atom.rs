//! Atom 1.0 feed rendering.

use anyhow::Result;
use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, Feed, FeedBuilder, FixedDateTime, GeneratorBuilder, Link,
    LinkBuilder, Person, PersonBuilder, Text,
};

use crate::config::SiteConfig;
use crate::utils::date::DateTimeUtc;

use super::common::FeedEntry;

pub(super) fn render(entries: &[FeedEntry], config: &SiteConfig, base_url: &str) -> Result<String> {
    let atom_entries: Vec<Entry> = entries.iter().map(to_entry).collect();

    // Entries arrive newest first; the feed's updated time is the first one.
    let updated = entries
        .first()
        .map(|e| e.updated.unwrap_or(e.date))
        .map_or_else(FixedDateTime::default, to_atom_date);

    let self_link: Link = LinkBuilder::default()
        .href(format!("{}/{}", base_url, config.feed.path.display()))
        .rel("self".to_string())
        .mime_type(Some("application/atom+xml".to_string()))
        .build();
    let alternate_link: Link = LinkBuilder::default()
        .href(base_url.to_string())
        .rel("alternate".to_string())
        .build();

    let feed: Feed = FeedBuilder::default()
        .title(Text::plain(config.site.title.clone()))
        .id(base_url)
        .updated(updated)
        .authors(site_authors(config))
        .links(vec![self_link, alternate_link])
        .subtitle(Some(Text::plain(config.site.description.clone())))
        .generator(Some(GeneratorBuilder::default().value("quill").build()))
        .lang(config.site.language.clone())
        .entries(atom_entries)
        .build();

    Ok(feed.to_string())
}

fn to_entry(entry: &FeedEntry) -> Entry {
    let link: Link = LinkBuilder::default()
        .href(entry.url.clone())
        .rel("alternate".to_string())
        .build();

    let authors: Vec<Person> = entry
        .author
        .as_ref()
        .map(|name| vec![PersonBuilder::default().name(name.clone()).build()])
        .unwrap_or_default();

    EntryBuilder::default()
        .title(Text::plain(entry.title.clone()))
        .id(entry.url.clone())
        .updated(to_atom_date(entry.updated.unwrap_or(entry.date)))
        .published(Some(to_atom_date(entry.date)))
        .links(vec![link])
        .summary(entry.summary.clone().map(Text::plain))
        .content(Some(
            ContentBuilder::default()
                .value(Some(entry.html.clone()))
                .content_type(Some("html".to_string()))
                .build(),
        ))
        .authors(authors)
        .build()
}

fn to_atom_date(date: DateTimeUtc) -> FixedDateTime {
    date.to_rfc3339()
        .parse()
        .unwrap_or_else(|_| FixedDateTime::default())
}

fn site_authors(config: &SiteConfig) -> Vec<Person> {
    if config.site.author.is_empty() {
        return vec![];
    }
    let email = (!config.site.email.is_empty()).then(|| config.site.email.clone());
    vec![
        PersonBuilder::default()
            .name(config.site.author.clone())
            .email(email)
            .build(),
    ]
}
