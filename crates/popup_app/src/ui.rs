use popup_core::{PopupViewModel, ProxyMode};

const SELECTABLE: [ProxyMode; 4] = [
    ProxyMode::On,
    ProxyMode::Direct,
    ProxyMode::System,
    ProxyMode::China,
];

/// Renders the view model to stdout. This stands in for the extension's
/// popup markup; layout and styling are out of scope.
pub fn render(view: &PopupViewModel) {
    println!();
    println!("== {} ==", view.banner.popup.title);
    println!("{}", view.banner.popup.description);
    if view.pending {
        println!("(loading)");
    }

    for mode in SELECTABLE {
        if mode == ProxyMode::China && !view.china_visible {
            continue;
        }
        println!("{} {mode}", radio(view.checked == Some(mode)));
    }
    if view.polyjuice_visible {
        println!("{} polyjuice", radio(view.checked == Some(ProxyMode::Polyjuice)));
        if view.selector_enabled {
            for row in &view.countries {
                let marker = if row.selected { ">" } else { " " };
                println!("  {marker} {} ({})", row.name, row.code);
            }
        } else if view.checked == Some(ProxyMode::Polyjuice) {
            println!("   (country selector disabled)");
        }
    }
}

fn radio(checked: bool) -> &'static str {
    if checked {
        "(o)"
    } else {
        "( )"
    }
}
