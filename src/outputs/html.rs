//! HTML page generation.
//!
//! Renders a [`Dashboard`] into one self-contained HTML document. Charts are
//! embedded as inline SVG from [`super::svg`]; there are no external assets.
//!
//! Every piece of article data is escaped before it is written, and article
//! URLs only become links when they are absolute `http`/`https` URLs.

use super::svg;
use crate::dashboard::{Dashboard, Report, Search};
use crate::error::DashboardError;
use crate::models::Article;
use crate::search::{NOT_AVAILABLE, STROKE_KEYWORD, excerpt};
use crate::utils::{escape_html, safe_href, slugify_title};
use std::fmt::{self, Write};

const PAGE_TITLE: &str = "📚 Analisis Artikel: gejala atau tanda-tanda stroke";
const EMPTY_WARNING: &str = "⚠️ Tidak ada data artikel yang tersedia di database.";

const HEADING_STATS: &str = "🧾 Statistik Umum";
const HEADING_MONTHLY: &str = "📆 Artikel per Bulan";
const HEADING_DOMAINS: &str = "🌐 5 Domain dengan Jumlah Artikel Terbanyak";
const HEADING_CLOUD: &str = "☁️ Word Cloud Judul Artikel";
const HEADING_SEARCH: &str = "🔍 Cari Artikel berdasarkan Judul";
const HEADING_KEYWORD: &str = "🧠 Artikel tentang Gejala Stroke";

const STYLE: &str = "\
body{font-family:system-ui,-apple-system,'Segoe UI',sans-serif;margin:0;background:#fafafa;color:#262730}
main{max-width:1100px;margin:0 auto;padding:2rem 1.5rem}
nav a{margin-right:1rem;font-size:.9rem}
section{margin:2rem 0}
.metrics{display:flex;gap:3rem}
.metric .label{font-size:.9rem;color:#555}
.metric .value{font-size:2.2rem}
.alert{padding:.8rem 1rem;border-radius:.4rem;margin:.5rem 0}
.warning{background:#fffce7;color:#926c05}
.info{background:#e8f2fc;color:#0c4a8a}
.success{background:#e9f9ee;color:#177233}
details{background:#fff;border:1px solid #e6e6e6;border-radius:.4rem;padding:.6rem 1rem}
summary{cursor:pointer}
table{border-collapse:collapse;width:100%;font-size:.85rem}
th,td{border:1px solid #e6e6e6;padding:.3rem .5rem;text-align:left;vertical-align:top}
td.body{max-width:420px;max-height:6em;overflow:hidden}
section svg{width:100%;height:auto;background:#fff}
hr{border:none;border-top:1px solid #ddd}
";

/// Render the full page for a view model.
///
/// `search_input` is echoed back into the search box as typed.
pub fn render_page(dashboard: &Dashboard<'_>, search_input: Option<&str>) -> Result<String, DashboardError> {
    let mut out = String::new();
    write_head(&mut out)?;
    writeln!(out, "<h1>{}</h1>", escape_html(PAGE_TITLE))?;

    match dashboard {
        Dashboard::Empty => write_alert(&mut out, "warning", EMPTY_WARNING)?,
        Dashboard::Ready(report) => write_report(&mut out, report, search_input)?,
    }

    out.push_str("</main>\n</body>\n</html>\n");
    Ok(out)
}

fn write_head(out: &mut String) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"id\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">"
    )?;
    writeln!(out, "<title>Analisis Artikel</title>")?;
    writeln!(out, "<style>\n{STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<main>")
}

fn write_alert(out: &mut String, kind: &str, message: &str) -> fmt::Result {
    writeln!(
        out,
        "<div class=\"alert {kind}\" role=\"status\">{}</div>",
        escape_html(message)
    )
}

fn open_section(out: &mut String, heading: &str) -> fmt::Result {
    writeln!(
        out,
        "<section id=\"{}\">\n<h3>{}</h3>",
        slugify_title(heading),
        escape_html(heading)
    )
}

fn write_nav(out: &mut String) -> fmt::Result {
    out.push_str("<nav>");
    for heading in [
        HEADING_STATS,
        HEADING_MONTHLY,
        HEADING_DOMAINS,
        HEADING_CLOUD,
        HEADING_SEARCH,
        HEADING_KEYWORD,
    ] {
        write!(
            out,
            "<a href=\"#{}\">{}</a>",
            slugify_title(heading),
            escape_html(heading)
        )?;
    }
    out.push_str("</nav>\n");
    Ok(())
}

/// A link to the article when the URL is safe, plain text otherwise.
fn write_link(out: &mut String, url: Option<&str>, label: &str) -> fmt::Result {
    match url.and_then(safe_href) {
        Some(href) => write!(
            out,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(href.as_str()),
            escape_html(label)
        ),
        None => write!(out, "{}", escape_html(url.unwrap_or(NOT_AVAILABLE))),
    }
}

fn text_or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

fn write_report(
    out: &mut String,
    report: &Report<'_>,
    search_input: Option<&str>,
) -> Result<(), DashboardError> {
    write_nav(out)?;
    write_stats(out, report)?;
    write_monthly(out, report)?;
    write_domains(out, report)?;
    write_cloud(out, report)?;
    write_search(out, &report.search, search_input)?;
    write_keyword_listing(out, &report.keyword_matches)?;
    Ok(())
}

fn write_stats(out: &mut String, report: &Report<'_>) -> fmt::Result {
    open_section(out, HEADING_STATS)?;
    writeln!(out, "<div class=\"metrics\">")?;
    for (label, value) in [
        ("📝 Total Artikel", report.summary.total),
        ("🌐 Jumlah Domain", report.summary.distinct_domains),
    ] {
        writeln!(
            out,
            "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{value}</div></div>",
            escape_html(label)
        )?;
    }
    writeln!(out, "</div>")?;

    writeln!(out, "<details>\n<summary>📋 Lihat Daftar Artikel</summary>")?;
    writeln!(
        out,
        "<table>\n<thead><tr><th>id</th><th>url</th><th>judul</th><th>konten</th><th>tanggal_rilis</th></tr></thead>\n<tbody>"
    )?;
    for article in report.articles {
        write_table_row(out, article)?;
    }
    writeln!(out, "</tbody>\n</table>\n</details>\n</section>")
}

fn write_table_row(out: &mut String, article: &Article) -> fmt::Result {
    let cell = |value: &Option<String>| escape_html(value.as_deref().unwrap_or("")).into_owned();
    writeln!(
        out,
        "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"body\">{}</td><td>{}</td></tr>",
        cell(&article.id),
        cell(&article.url),
        cell(&article.title),
        cell(&article.body),
        cell(&article.release_date)
    )
}

fn write_monthly(out: &mut String, report: &Report<'_>) -> Result<(), DashboardError> {
    open_section(out, HEADING_MONTHLY)?;
    if report.monthly.is_empty() {
        write_alert(
            out,
            "info",
            "Tidak ada data tanggal valid untuk divisualisasikan.",
        )?;
    } else {
        out.push_str(&svg::line_chart(&report.monthly)?);
    }
    writeln!(out, "</section>")?;
    Ok(())
}

fn write_domains(out: &mut String, report: &Report<'_>) -> Result<(), DashboardError> {
    open_section(out, HEADING_DOMAINS)?;
    out.push_str(&svg::bar_chart(&report.top_domains)?);
    writeln!(out, "</section>")?;
    Ok(())
}

fn write_cloud(out: &mut String, report: &Report<'_>) -> fmt::Result {
    open_section(out, HEADING_CLOUD)?;
    match &report.word_cloud {
        Some(cloud) => out.push_str(&svg::word_cloud(cloud)?),
        None => write_alert(out, "info", "Tidak ada judul artikel untuk dibuat Word Cloud.")?,
    }
    writeln!(out, "</section>")
}

fn write_search(out: &mut String, search: &Search<'_>, search_input: Option<&str>) -> fmt::Result {
    open_section(out, HEADING_SEARCH)?;
    let open = if matches!(search, Search::Results { .. }) {
        " open"
    } else {
        ""
    };
    writeln!(
        out,
        "<details{open}>\n<summary>Cari Artikel berdasarkan Judul Artikel</summary>"
    )?;
    writeln!(
        out,
        "<form method=\"get\" action=\"#{}\">\n<label for=\"q\">Masukkan judul atau kata kunci artikel:</label>\n<input type=\"text\" id=\"q\" name=\"q\" value=\"{}\">\n<button type=\"submit\">Cari</button>\n</form>",
        slugify_title(HEADING_SEARCH),
        escape_html(search_input.unwrap_or(""))
    )?;

    if let Search::Results { matches } = search {
        if matches.is_empty() {
            write_alert(
                out,
                "warning",
                "❌ Tidak ditemukan artikel yang sesuai dengan kata kunci.",
            )?;
        }
        for article in matches {
            write_alert(out, "success", "✅ Ditemukan artikel:")?;
            writeln!(
                out,
                "<p><em>📰 Judul:</em> {}</p>",
                escape_html(text_or_placeholder(article.title.as_deref()))
            )?;
            writeln!(
                out,
                "<p><em>📅 Tanggal Rilis:</em> {}</p>",
                escape_html(text_or_placeholder(article.release_date.as_deref()))
            )?;
            writeln!(
                out,
                "<p><em>📖 Konten:</em> {}</p>",
                escape_html(text_or_placeholder(article.body.as_deref()))
            )?;
            out.push_str("<p><em>🔗 URL:</em> ");
            write_link(out, article.url.as_deref(), article.url.as_deref().unwrap_or(""))?;
            writeln!(out, "</p>\n<hr>")?;
        }
    }
    writeln!(out, "</details>\n</section>")
}

fn write_keyword_listing(out: &mut String, matches: &[&Article]) -> fmt::Result {
    open_section(out, HEADING_KEYWORD)?;
    if matches.is_empty() {
        write_alert(
            out,
            "info",
            &format!("Tidak ditemukan artikel yang mengandung kata '{STROKE_KEYWORD}'."),
        )?;
    }
    for article in matches {
        writeln!(
            out,
            "<h4>{}</h4>",
            escape_html(text_or_placeholder(article.title.as_deref()))
        )?;
        writeln!(
            out,
            "<p>📅 Tanggal Rilis: {}</p>",
            escape_html(text_or_placeholder(article.release_date.as_deref()))
        )?;
        out.push_str("<p>🔗 ");
        write_link(out, article.url.as_deref(), "Buka Artikel")?;
        writeln!(out, "</p>")?;
        writeln!(
            out,
            "<p>📄 Konten: {}</p>\n<hr>",
            escape_html(&excerpt(article.body.as_deref()))
        )?;
    }
    writeln!(out, "</section>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build;
    use crate::models::RawArticle;
    use crate::normalize::normalize_articles;
    use mongodb::bson::Bson;

    fn raw(title: Option<&str>, body: Option<&str>, date: Option<&str>, url: Option<&str>) -> RawArticle {
        let text = |value: Option<&str>| value.map(|v| Bson::String(v.to_string()));
        RawArticle {
            id: None,
            title: text(title),
            body: text(body),
            release_date: text(date),
            url: text(url),
        }
    }

    #[test]
    fn test_empty_dashboard_renders_only_warning() {
        let html = render_page(&Dashboard::Empty, None).unwrap();
        assert!(html.contains(EMPTY_WARNING));
        assert!(!html.contains("<svg"));
        assert!(!html.contains(HEADING_STATS));
    }

    #[test]
    fn test_full_page_sections() {
        let articles = normalize_articles(vec![raw(
            Some("Tanda Stroke Ringan"),
            Some("Kenali gejalanya sejak dini."),
            Some("2024-01-15"),
            Some("https://a.com/x"),
        )]);
        let html = render_page(&build(&articles, None), None).unwrap();

        assert!(html.contains("<div class=\"value\">1</div>"));
        assert!(html.contains("id=\"artikel-per-bulan\""));
        assert_eq!(html.matches("<svg").count(), 3);
        assert!(html.contains("<h4>Tanda Stroke Ringan</h4>"));
        assert!(html.contains("Kenali gejalanya sejak dini...."));
        assert!(html.contains("href=\"https://a.com/x\""));
        // Idle search stays collapsed.
        assert!(html.contains("<details>\n<summary>Cari Artikel"));
    }

    #[test]
    fn test_no_dates_shows_info_instead_of_chart() {
        let articles = normalize_articles(vec![raw(
            Some("Resep Sehat"),
            Some("tidak ada stroke di sini"),
            None,
            None,
        )]);
        let html = render_page(&build(&articles, None), None).unwrap();
        assert!(html.contains("Tidak ada data tanggal valid untuk divisualisasikan."));
        assert!(html.contains("📅 Tanggal Rilis: Tidak tersedia"));
        // Bar chart and word cloud remain.
        assert_eq!(html.matches("<svg").count(), 2);
    }

    #[test]
    fn test_search_results_rendered_open() {
        let articles = normalize_articles(vec![raw(
            Some("Tanda Stroke Ringan"),
            Some("Isi lengkap"),
            None,
            Some("https://a.com/x"),
        )]);
        let html = render_page(&build(&articles, Some("STROKE")), Some("STROKE")).unwrap();
        assert!(html.contains("<details open>"));
        assert!(html.contains("value=\"STROKE\""));
        assert!(html.contains("✅ Ditemukan artikel:"));
        assert!(html.contains("<em>📖 Konten:</em> Isi lengkap"));
    }

    #[test]
    fn test_search_without_matches_warns() {
        let articles = normalize_articles(vec![raw(Some("Resep Sehat"), None, None, None)]);
        let html = render_page(&build(&articles, Some("jantung")), Some("jantung")).unwrap();
        assert!(html.contains("❌ Tidak ditemukan artikel yang sesuai dengan kata kunci."));
        assert!(html.contains("Tidak ditemukan artikel yang mengandung kata &apos;stroke&apos;."));
    }

    #[test]
    fn test_article_data_is_escaped() {
        let articles = normalize_articles(vec![raw(
            Some("<script>alert('stroke')</script>"),
            None,
            None,
            Some("javascript:alert(1)"),
        )]);
        let html = render_page(&build(&articles, None), None).unwrap();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("href=\"javascript:"));
    }
}
