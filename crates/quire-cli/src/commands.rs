use colored::Colorize;
use quire::{BuildConfig, PageSize, SiteBuilder, SiteLayout};
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

fn log_step(message: &str) {
    println!("\n{message}");
}

pub fn build_blog(
    root: &Path,
    posts_per_page: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_size = PageSize::from_setting(posts_per_page)?;

    println!("\n{}", "STARTING THE SITE BUILD".green());
    let start = Instant::now();

    let builder = SiteBuilder::new(BuildConfig::new(SiteLayout::new(root), page_size));
    let summary = builder.build()?;

    log_step(&format!(
        "Built {} posts, {} index pages and {} assets to {} in {:.2?}",
        summary.posts,
        summary.index_pages,
        summary.assets,
        builder.layout().output_dir().display(),
        start.elapsed()
    ));
    println!("\n{}\n", "SITE BUILD COMPLETE!".green());

    Ok(())
}

pub fn new_post(root: &Path, title: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let title = match title {
        Some(title) => title,
        None => prompt_title()?,
    };

    let layout = SiteLayout::new(root);
    let path = quire::new_post(&layout.source_dir(), &title, chrono::Utc::now())?;

    println!("\n{}", "File created!".green());
    log_step(&path.display().to_string());

    Ok(())
}

fn prompt_title() -> std::io::Result<String> {
    print!("{}", "\nWhat would you like to name this post? ".green());
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
