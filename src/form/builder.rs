//! The "build your own image" profile option.
//!
//! Wires the repository combobox, the git ref field and the hidden image field to a
//! [`BuildDriver`]. The host calls [`ImageBuilder::start_build`] from its "Build
//! image" button, or the split [`begin_build`](ImageBuilder::begin_build) /
//! [`finish_build`](ImageBuilder::finish_build) pair when the build must run while the
//! session stays observable (e.g. to render the disabled button).

use super::image_field::ImageField;
use super::repository::normalize_repository;
use super::text_field::TextField;
use super::validate::ValidateConfig;
use crate::build::{BuildDriver, BuildError, BuildRequest, BuildService};
use crate::combobox::Combobox;
use crate::sink::OutputSink;

pub const REPOSITORY_REQUIRED: &str = "Provide the repository.";
pub const REF_REQUIRED: &str = "Enter a git ref.";
pub const REF_HINT: &str = "Branch, Tag or Commit to use. HEAD will use the default branch";
pub const BUILD_SUCCEEDED: &str =
    "\nImage has been built! Click the start button to launch your server";

/// Result of pressing "Build image".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartBuild {
    /// The image was built and stored in the hidden field
    Built(String),
    /// The build ran and failed; details are in the log
    Failed,
    /// A field needs attention; its error is now displayed
    Invalid,
    /// A build is already running
    Busy,
}

/// State of one image-building profile option.
#[derive(Debug)]
pub struct ImageBuilder {
    name: String,
    active: bool,
    repository: Combobox,
    git_ref: TextField,
    image: ImageField,
    building: bool,
}

impl ImageBuilder {
    /// `name` is the form field name the built image is submitted under.
    pub fn new(name: impl Into<String>, default_ref: impl Into<String>) -> Self {
        let name = name.into();
        let repository = Combobox::new("repo", "Repository")
            .with_validate(ValidateConfig::required(REPOSITORY_REQUIRED));
        let git_ref = TextField::new(format!("{}--ref", name), "Git Ref")
            .with_hint(REF_HINT)
            .with_value(default_ref);
        let image = ImageField::new(name.clone());

        let mut builder = Self {
            name,
            active: false,
            repository,
            git_ref,
            image,
            building: false,
        };
        builder.set_active(false);
        builder
    }

    /// Previously used repositories offered by the combobox.
    pub fn with_repository_options<I, T>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.repository.set_options(options);
        self
    }

    /// Prefill repository and ref, e.g. from a shared link.
    pub fn prefill(&mut self, repository: &str, git_ref: Option<&str>) {
        self.repository.set_value(repository);
        if let Some(git_ref) = git_ref {
            self.git_ref.input(git_ref);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Show or hide this option. Hidden options are skipped by tab navigation,
    /// do not validate, and do not require an image.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        let tab_index = if active { 0 } else { -1 };
        self.repository.set_tab_index(Some(tab_index));
        self.git_ref.set_tab_index(Some(tab_index));
        self.git_ref.set_validate(if active {
            ValidateConfig::required(REF_REQUIRED)
        } else {
            ValidateConfig::default()
        });
        self.image.set_required(active);
        if !active {
            self.image.clear_error();
        }
    }

    pub fn repository(&self) -> &Combobox {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut Combobox {
        &mut self.repository
    }

    pub fn git_ref(&self) -> &TextField {
        &self.git_ref
    }

    pub fn git_ref_mut(&mut self) -> &mut TextField {
        &mut self.git_ref
    }

    pub fn image(&self) -> &ImageField {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut ImageField {
        &mut self.image
    }

    /// True from `begin_build` until `finish_build`; the build button is disabled.
    pub fn is_building(&self) -> bool {
        self.building
    }

    /// Validate the fields and mark a build as started.
    ///
    /// An empty field is focused and blurred so its required message shows.
    pub fn begin_build(&mut self) -> Result<BuildRequest, StartBuild> {
        if self.building {
            return Err(StartBuild::Busy);
        }

        if self.repository.value().trim().is_empty() {
            self.repository.focus();
            self.repository.blur();
            return Err(StartBuild::Invalid);
        }
        let repository = match normalize_repository(self.repository.value()) {
            Ok(repository) => {
                self.repository.set_error(None);
                repository
            }
            Err(message) => {
                self.repository.set_error(Some(message.to_string()));
                return Err(StartBuild::Invalid);
            }
        };

        if self.git_ref.value().trim().is_empty() {
            self.git_ref.blur();
            return Err(StartBuild::Invalid);
        }

        self.building = true;
        Ok(BuildRequest::new(repository, self.git_ref.value().trim()))
    }

    /// Record the outcome of a build started with `begin_build`.
    pub fn finish_build(
        &mut self,
        result: Result<String, BuildError>,
        sink: &mut dyn OutputSink,
    ) -> StartBuild {
        self.building = false;
        match result {
            Ok(image) => {
                self.image.set_value(image.clone());
                sink.write_text(BUILD_SUCCEEDED);
                sink.fit();
                StartBuild::Built(image)
            }
            Err(e) => {
                tracing::warn!(name = %self.name, error = %e, "Error building image.");
                StartBuild::Failed
            }
        }
    }

    /// Validate, build, and store the image.
    pub async fn start_build<S: BuildService>(
        &mut self,
        driver: &BuildDriver<S>,
        sink: &mut dyn OutputSink,
    ) -> StartBuild {
        let request = match self.begin_build() {
            Ok(request) => request,
            Err(rejected) => return rejected,
        };
        let result = driver.run_build(&request, sink).await;
        self.finish_build(result, sink)
    }
}
