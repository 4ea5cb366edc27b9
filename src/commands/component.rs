use crate::{
    errors::Result,
    scaffold::{builtin_templates, load_templates, scaffold_component, ComponentScaffoldRequest},
};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Component {
    /// Component name, letters and digits starting with a letter
    pub name: String,

    /// Folder in which the component folder is created
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Use every file of this folder as a template instead of the built-in JSX pair
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

impl Component {
    pub fn execute(&self) -> Result<()> {
        let templates = match &self.template_dir {
            Some(dir) => load_templates(dir)?,
            None => builtin_templates(),
        };

        let request = ComponentScaffoldRequest {
            target_directory: self.dir.clone(),
            component_name: self.name.trim().to_string(),
        };

        let created = scaffold_component(&request, &templates)?;

        let name = created
            .directory
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("✅ {} component created in {}", name, created.directory.display());

        Ok(())
    }
}
