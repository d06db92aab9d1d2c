use crate::commands::export::read_page;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_model::{ActionKind, Component, ComponentKind, Document};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Page document to inspect
    pub file: String,

    /// Print the normalized document as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.file);
    let record = read_page(&path)?;
    let document = Document::try_from(record)?;

    if args.json {
        println!("{}", document.to_record().to_json_pretty()?);
        return Ok(());
    }

    let title = if document.title.is_empty() {
        "(untitled)".dimmed().to_string()
    } else {
        document.title.bright_white().bold().to_string()
    };
    println!("📄 {}", title);
    println!("   {} components", document.components.len());
    println!();

    for (index, component) in document.components.iter().enumerate() {
        println!(
            "  {:>3}. {:<8} {} {}",
            index,
            component.component_type().to_string().cyan(),
            component.id().to_string().dimmed(),
            summary(component)
        );

        let mut details = Vec::new();
        if !component.style.is_empty() {
            details.push(format!("{} styles", component.style.len()));
        }
        if !component.animation.is_none() {
            details.push(format!("animation: {}", component.animation.kind));
        }
        match component.action.kind {
            ActionKind::Link => details.push(format!(
                "link → {}",
                component.action.url.as_deref().unwrap_or("")
            )),
            ActionKind::Scroll | ActionKind::Modal => details.push(format!(
                "{} → #{}",
                component.action.kind,
                component.action.target_id.as_deref().unwrap_or("")
            )),
            ActionKind::None => {}
        }
        if !details.is_empty() {
            println!("       {}", details.join(", ").dimmed());
        }
    }

    Ok(())
}

fn summary(component: &Component) -> String {
    match &component.kind {
        ComponentKind::Header { content }
        | ComponentKind::Text { content }
        | ComponentKind::Button { content } => format!("\"{}\"", truncate(content, 40)),
        ComponentKind::Image { src, .. } => truncate(src, 40),
        ComponentKind::Divider => String::new(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
