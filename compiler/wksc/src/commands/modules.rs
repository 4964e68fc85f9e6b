//! The `modules` command: what `import_module` can load.

use wks_eval::registry;

/// With no name, list every registered module; with one, list its members.
pub fn list_modules(name: Option<&str>) {
    let registry = registry();
    let Some(name) = name else {
        for module in registry.module_names() {
            println!("{module}");
        }
        return;
    };
    match registry.member_names(name) {
        Some(members) => {
            println!("Module '{name}' ({} members):", members.len());
            for member in members {
                println!("  {member}");
            }
        }
        None => {
            eprintln!("error: no module named '{name}'");
            std::process::exit(1);
        }
    }
}
