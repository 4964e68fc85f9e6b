//! Built-in modules available through `import_module`.
//!
//! Each module declares a static [`ModuleDescriptor`]: the allow-list of
//! members scripts can reach. Nothing outside a descriptor is importable.

mod collections;
mod datetime;
mod html;
mod json;
mod math;
mod random;
mod re;
mod statistics;
mod string;
mod textwrap;
mod time;
mod unicodedata;
mod zoneinfo;

use crate::registry::ModuleDescriptor;

/// Every built-in module, sub-modules included.
pub(crate) fn descriptors() -> Vec<ModuleDescriptor> {
    vec![
        collections::DESCRIPTOR,
        datetime::DESCRIPTOR,
        html::DESCRIPTOR,
        html::entities::DESCRIPTOR,
        html::parser::DESCRIPTOR,
        json::DESCRIPTOR,
        math::DESCRIPTOR,
        random::DESCRIPTOR,
        re::DESCRIPTOR,
        statistics::DESCRIPTOR,
        string::DESCRIPTOR,
        textwrap::DESCRIPTOR,
        time::DESCRIPTOR,
        unicodedata::DESCRIPTOR,
        zoneinfo::DESCRIPTOR,
    ]
}

#[cfg(test)]
mod tests;
