use std::fmt::Write;

use htmlescape::encode_minimal;

use crate::domain::feeds::post::Post;

#[derive(Debug, Clone)]
pub struct RssChannel {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Renders an RSS 2.0 document. Items keep the order they are given in.
pub fn render_rss(channel: &RssChannel, posts: &[Post]) -> String {
    let mut out = String::with_capacity(512 + posts.len() * 256);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(r#"<rss version="2.0"><channel>"#);
    let _ = write!(
        out,
        "<title>{}</title><link>{}</link><description>{}</description>",
        encode_minimal(&channel.title),
        encode_minimal(&channel.link),
        encode_minimal(&channel.description),
    );
    if let Some(newest) = posts.first() {
        let _ = write!(
            out,
            "<lastBuildDate>{}</lastBuildDate>",
            newest.published_at.to_rfc2822()
        );
    }
    for post in posts {
        let link = encode_minimal(&post.link);
        let _ = write!(
            out,
            "<item><title>{}</title><link>{}</link><guid isPermaLink=\"false\">{}</guid><pubDate>{}</pubDate><source url=\"{}\">{}</source>",
            encode_minimal(&post.title),
            link,
            encode_minimal(&post.checksum),
            post.published_at.to_rfc2822(),
            link,
            encode_minimal(&post.blog),
        );
        if let Some(summary) = post.summary.as_deref() {
            let _ = write!(out, "<description>{}</description>", encode_minimal(summary));
        }
        out.push_str("</item>");
    }
    out.push_str("</channel></rss>");
    out
}
