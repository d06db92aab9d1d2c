use crate::config::{Config, DEFAULT_CONFIG_NAME, PAGE_EXTENSION};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::Editor;
use pagecraft_model::{
    default_palette, Action, Animation, AnimationKind, ComponentPatch, ComponentType, DocumentRecord,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory for page documents
    #[arg(short, long, default_value = "pages")]
    pub src_dir: String,

    /// Directory for exported pages
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagecraft project...".bright_blue().bold()
    );

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: args.out_dir.clone(),
        ..Default::default()
    };

    // Create source directory if it doesn't exist
    let src_dir = config.get_src_dir(cwd);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    // Create example page
    let example_name = format!("example{}", PAGE_EXTENSION);
    let example_file = src_dir.join(&example_name);
    if !example_file.exists() {
        let record = example_page(&config)?;
        fs::write(&example_file, record.to_json_pretty()?)?;
        println!("  {} Created {}", "✓".green(), example_name);
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/{}", args.src_dir, example_name);
    println!("  2. Run: pagecraft export");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}

/// Build the starter page the way the editor would: palette drops, then
/// settings patches
pub fn example_page(config: &Config) -> Result<DocumentRecord> {
    let mut editor = Editor::new(&config.history);
    editor.set_title("Example Page");

    for entry in default_palette() {
        editor.handle_drop(&entry.to_json())?;
    }

    let find = |ty: ComponentType| {
        editor
            .components()
            .iter()
            .find(|c| c.component_type() == ty)
            .map(|c| c.id().clone())
    };
    let header = find(ComponentType::Header);
    let text = find(ComponentType::Text);
    let button = find(ComponentType::Button);

    if let Some(header) = &header {
        editor.patch(
            header,
            ComponentPatch::content("Welcome to Pagecraft")
                .with_style("alignment", "center")
                .with_animation(Animation::new(AnimationKind::Fade).into()),
        )?;
    }
    if let (Some(button), Some(text)) = (&button, &text) {
        editor.patch(
            button,
            ComponentPatch::content("Read more")
                .with_style("backgroundColor", "#3366FF")
                .with_style("color", "white")
                .with_style("padding", 8)
                .with_action(Action::scroll(text.as_str()).into()),
        )?;
    }

    Ok(editor.document().to_record())
}
