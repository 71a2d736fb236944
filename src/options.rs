use clap::Parser;

/// Create or edit .desktop menu entries.
///
/// Pass an executable to create (or update) its menu entry, or the name of
/// an existing .desktop file to edit it.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "desktopmenuitem", author, version, about, long_about = None)]
pub struct Options {
    /// Executable to add, or an existing .desktop file
    #[arg(value_name = "EXECUTABLE")]
    pub target: Option<String>,

    /// View the .desktop file
    #[arg(long)]
    pub view: bool,

    /// Open the .desktop file in your editor
    #[arg(long)]
    pub edit: bool,

    /// List all .desktop files, optionally fuzzy filtered
    #[arg(long, value_name = "FILTER", num_args = 0..=1)]
    pub list: Option<Option<String>>,

    /// Desktop file to use
    #[arg(short, long, value_name = "FILE")]
    pub desktop: Option<String>,

    /// Set keywords
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Set mime type
    #[arg(short, long, value_name = "TYPE")]
    pub mime: Option<String>,

    /// Set name (default: app name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Set executable path
    #[arg(short, long, value_name = "PATH")]
    pub exec: Option<String>,

    /// Icon name or path
    #[arg(short, long)]
    pub icon: Option<String>,

    /// Hide application from menu
    #[arg(long)]
    pub hide: bool,

    /// App requires a terminal
    #[arg(short, long)]
    pub terminal: bool,

    /// Set keys from a JSON object, e.g. '{"Categories":"Utility;"}'
    #[arg(long, value_name = "JSON")]
    pub json: Option<String>,

    /// Modify entries outside your own directory in place (requires root)
    #[arg(long)]
    pub overwrite: bool,
}

impl Options {
    pub fn has_target(&self) -> bool {
        self.target.as_deref().is_some_and(|t| !t.is_empty())
            || self.desktop.as_deref().is_some_and(|d| !d.is_empty())
    }
}
