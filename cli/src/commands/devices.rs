use lanwatch_common::network::registry::DeviceRegistry;

use crate::lprint;
use crate::terminal::{format, print};

pub fn devices(registry: &DeviceRegistry) {
    print::header("registered devices");

    if registry.is_empty() {
        print::no_results();
        return;
    }

    for (idx, device) in registry.devices().iter().enumerate() {
        print::tree_head(idx, &device.name, "".into());
        print::as_tree_one_level(format::device_to_details(device));
        if idx + 1 != registry.len() {
            lprint!();
        }
    }
}
