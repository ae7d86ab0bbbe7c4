//! Opening the packages a selection of files originated from.

use std::path::{Component, Path};
use std::thread;
use std::time::Duration;

use crate::app::report::{self, ALERT_TITLE};
use crate::domain::model::{ClassifyOutcome, SelectionBatch, base_name};
use crate::infra::attributes::AttributeStore;
use crate::infra::config::Config;
use crate::infra::launcher::{LaunchOutcome, Launcher};
use crate::infra::locations::PackageLocations;
use crate::ui::dialog::{Alert, Presenter};

/// Entry point invoked by the host with the current selection.
///
/// Handlers never fail: everything that goes wrong for a file or package ends up in the report.
pub trait SelectionHandler {
    fn handle(&mut self, selection: &SelectionBatch);
}

/// Runtime options for [`OriginPackageOpener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenerOptions {
    /// Selections larger than this ask for confirmation first.
    pub confirm_threshold: usize,
    pub unattributed_display_cap: usize,
    pub unresolved_display_cap: usize,
    pub report_unresolved_packages: bool,
    pub settle_base: Duration,
    pub settle_per_package: Duration,
}

impl OpenerOptions {
    /// Build options from configuration defaults.
    pub fn from_config(config: &Config) -> Self {
        Self {
            confirm_threshold: config.defaults.confirm_threshold(),
            unattributed_display_cap: config.defaults.unattributed_display_cap(),
            unresolved_display_cap: config.defaults.unresolved_display_cap(),
            report_unresolved_packages: config.defaults.report_unresolved_packages(),
            settle_base: Duration::from_millis(config.timing.settle_base_ms()),
            settle_per_package: Duration::from_millis(config.timing.settle_per_package_ms()),
        }
    }

    /// Pause before the final alert so windows of opened packages can appear beneath it.
    pub fn settle_delay(&self, opened: usize) -> Duration {
        if opened == 0 {
            return Duration::ZERO;
        }
        let per_package = u32::try_from(opened).unwrap_or(u32::MAX);
        self.settle_base
            .saturating_add(self.settle_per_package.saturating_mul(per_package))
    }
}

impl Default for OpenerOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Looks up the origin package of each selected file and asks the desktop to open it.
pub struct OriginPackageOpener<A, N, L, P> {
    attributes: A,
    locations: N,
    launcher: L,
    presenter: P,
    options: OpenerOptions,
}

impl<A, N, L, P> OriginPackageOpener<A, N, L, P>
where
    A: AttributeStore,
    N: PackageLocations,
    L: Launcher,
    P: Presenter,
{
    pub fn new(
        attributes: A,
        locations: N,
        launcher: L,
        presenter: P,
        options: OpenerOptions,
    ) -> Self {
        Self {
            attributes,
            locations,
            launcher,
            presenter,
            options,
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Ask before acting on a large selection. Returns `false` when the user declines.
    pub fn confirm(&mut self, count: usize) -> bool {
        if count <= self.options.confirm_threshold {
            return true;
        }

        let message = format!(
            "You have selected {count} files.\nDo you really want to open all of their packages?"
        );
        let alert = Alert::confirm(ALERT_TITLE, message, "Open all", "Cancel");
        self.presenter.show(&alert) == 0
    }

    /// Bucket the selection by origin package, opening each distinct package once.
    pub fn classify(&mut self, selection: &SelectionBatch) -> ClassifyOutcome {
        let mut outcome = ClassifyOutcome::default();

        for reference in selection.iter() {
            let path = reference.resolve();
            let package = match self.attributes.origin_package(&path) {
                Ok(Some(package)) => package,
                Ok(None) => {
                    tracing::debug!(path = %path.display(), "no origin package recorded");
                    outcome.unattributed.insert(base_name(&path));
                    continue;
                }
                Err(err) => {
                    tracing::debug!(
                        path = %path.display(),
                        error = %err,
                        "origin package unreadable"
                    );
                    outcome.unattributed.insert(base_name(&path));
                    continue;
                }
            };

            if !outcome.packages.insert(package.as_str()) {
                continue;
            }

            if self.resolve_and_open(&package) {
                outcome.opened += 1;
            } else {
                outcome.unresolved.insert(package);
            }
        }

        outcome
    }

    /// Open `package` in every storage location that holds it. Returns `true` when at least one
    /// open request succeeded.
    pub fn resolve_and_open(&mut self, package: &str) -> bool {
        if !is_plain_file_name(package) {
            tracing::debug!(package, "package name is not a plain file name");
            return false;
        }

        let mut found = false;

        for location in self.locations.package_dirs() {
            let candidate = location.join(package);
            if !candidate.exists() {
                tracing::debug!(package, location = %location.display(), "not in location");
                continue;
            }

            match self.launcher.launch(&candidate) {
                Ok(LaunchOutcome::Launched | LaunchOutcome::AlreadyRunning) => {
                    tracing::info!(package, path = %candidate.display(), "opened package");
                    found = true;
                }
                Err(err) => {
                    tracing::debug!(
                        package,
                        path = %candidate.display(),
                        error = %err,
                        "open failed"
                    );
                }
            }
        }

        found
    }

    /// Show the combined report, if there is anything to report.
    pub fn present(&mut self, outcome: &ClassifyOutcome) {
        let found_some = outcome.found_some();
        let unattributed = report::unattributed_report(
            &outcome.unattributed,
            self.options.unattributed_display_cap,
            found_some,
        );
        let unresolved = if self.options.report_unresolved_packages {
            report::unresolved_report(
                &outcome.unresolved,
                self.options.unresolved_display_cap,
                found_some,
            )
        } else {
            None
        };

        let Some(message) = report::compose([unattributed, unresolved]) else {
            return;
        };

        let delay = self.options.settle_delay(outcome.opened);
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        self.presenter.show(&Alert::info(ALERT_TITLE, message, "OK"));
    }
}

/// A package name must stay inside the location it is joined onto.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl<A, N, L, P> SelectionHandler for OriginPackageOpener<A, N, L, P>
where
    A: AttributeStore,
    N: PackageLocations,
    L: Launcher,
    P: Presenter,
{
    fn handle(&mut self, selection: &SelectionBatch) {
        if !self.confirm(selection.len()) {
            tracing::info!(count = selection.len(), "selection declined");
            return;
        }

        let outcome = self.classify(selection);
        tracing::debug!(
            packages = outcome.packages.len(),
            opened = outcome.opened,
            unattributed = outcome.unattributed.len(),
            unresolved = outcome.unresolved.len(),
            "selection processed"
        );
        self.present(&outcome);
    }
}
