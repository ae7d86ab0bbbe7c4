//! Summary texts for files and packages that could not be handled.

use crate::domain::model::NameSet;

/// Title shared by every alert the add-on shows.
pub const ALERT_TITLE: &str = "Open Origin Package";

const BULLET: &str = "\t‣ ";
const SECTION_SEPARATOR: &str = "\n\n";

/// Singular and plural forms of a message. `%name%` in `one` is replaced by the entry, `#` in
/// `other` by the count.
#[derive(Debug, Clone, Copy)]
pub struct PluralTemplate {
    pub one: &'static str,
    pub other: &'static str,
}

/// Pick the form for `count` and fill in the count.
pub fn format_plural(count: usize, template: &PluralTemplate) -> String {
    if count == 1 {
        template.one.to_owned()
    } else {
        template.other.replace('#', &count.to_string())
    }
}

struct Wording {
    template: PluralTemplate,
    /// Used past the display cap when some packages were opened.
    rest: &'static str,
    /// Used past the display cap when nothing was opened.
    none: &'static str,
}

const UNATTRIBUTED: Wording = Wording {
    template: PluralTemplate {
        one: "The file '%name%' does not belong to any package.",
        other: "These # files do not belong to any package:\n",
    },
    rest: "The rest of the files don't belong to any package.",
    none: "None of these files belong to any package.",
};

const UNRESOLVED: Wording = Wording {
    template: PluralTemplate {
        one: "The package '%name%' cannot be found. It may have been uninstalled.",
        other: "The following # packages cannot be found. They may have been uninstalled.\n",
    },
    rest: "The packages of rest of these files couldn't be found. They may have been \
           uninstalled.",
    none: "None of the packages of these files could be found. They may have been \
           uninstalled.",
};

/// Report section for files without a recorded origin package.
pub fn unattributed_report(
    files: &NameSet,
    display_cap: usize,
    found_some: bool,
) -> Option<String> {
    render(files, display_cap, found_some, &UNATTRIBUTED)
}

/// Report section for packages found in no storage location.
pub fn unresolved_report(
    packages: &NameSet,
    display_cap: usize,
    found_some: bool,
) -> Option<String> {
    render(packages, display_cap, found_some, &UNRESOLVED)
}

/// Join the non-empty sections with a blank line. `None` when there is nothing to say.
pub fn compose<I>(sections: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let sections: Vec<String> = sections.into_iter().flatten().collect();
    if sections.is_empty() {
        None
    } else {
        Some(sections.join(SECTION_SEPARATOR))
    }
}

fn render(
    names: &NameSet,
    display_cap: usize,
    found_some: bool,
    wording: &Wording,
) -> Option<String> {
    let first = names.first()?;
    let count = names.len();
    let mut text = format_plural(count, &wording.template);

    if count == 1 {
        text = text.replacen("%name%", first, 1);
    } else if count < display_cap {
        for name in names.as_slice() {
            text.push_str(BULLET);
            text.push_str(name);
            text.push('\n');
        }
    } else if found_some {
        text = wording.rest.to_owned();
    } else {
        text = wording.none.to_owned();
    }

    Some(text)
}
