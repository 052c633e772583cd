use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{instance::Instance, schedule::Schedule},
    cost::Cost,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Per-event summary with the grand total in the last row.
pub fn build_events_table(schedule: &Schedule) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Event", "Duration", "Start", "End", "Electricity", "Labor", "Total"]);
    for event in schedule.events() {
        table.add_row(vec![
            Cell::new(format!("#{}", event.event + 1)).add_attribute(Attribute::Bold),
            Cell::new(event.duration).set_alignment(CellAlignment::Right),
            Cell::new(event.window.start).set_alignment(CellAlignment::Right),
            Cell::new(event.window.end)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(event.costs.electricity).set_alignment(CellAlignment::Right),
            Cell::new(event.costs.labor).set_alignment(CellAlignment::Right),
            Cell::new(event.total_cost()).set_alignment(CellAlignment::Right),
        ]);
    }
    let total = schedule.total();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(total.electricity).set_alignment(CellAlignment::Right),
        Cell::new(total.labor).set_alignment(CellAlignment::Right),
        Cell::new(total.total()).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Combined timeline: every slot with its prices and the active event.
pub fn build_timeline_table(instance: &Instance, schedule: &Schedule) -> Table {
    #[expect(clippy::cast_precision_loss)]
    let mean_price = (instance.electricity().iter().copied().sum::<Cost>()
        + instance.labor().iter().copied().sum::<Cost>())
        * (1.0 / instance.horizon() as f64);

    let mut table = new_table();
    table.set_header(vec!["Slot", "Electricity", "Labor", "Total", "Event"]);
    for (slot, event) in schedule.occupancy().iter().enumerate() {
        let (electricity, labor) = (instance.electricity()[slot], instance.labor()[slot]);
        let price = electricity + labor;
        table.add_row(vec![
            Cell::new(slot).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(electricity).set_alignment(CellAlignment::Right),
            Cell::new(labor).set_alignment(CellAlignment::Right),
            Cell::new(price)
                .set_alignment(CellAlignment::Right)
                .fg(if price > mean_price { Color::Red } else { Color::Green }),
            match event {
                Some(event) => Cell::new(format!("#{}", event + 1)).fg(Color::Blue),
                None => Cell::new("idle").add_attribute(Attribute::Dim),
            },
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{instance::tests::instance, solver::Solver};

    #[test]
    fn tables_ok() {
        let instance = instance(&[5.0, 1.0, 1.0, 5.0], &[0.0; 4], &[2, 1]);
        let schedule = Solver::builder().instance(&instance).solve().unwrap();

        let events = build_events_table(&schedule);
        assert_eq!(events.row_count(), 3);

        let timeline = build_timeline_table(&instance, &schedule);
        assert_eq!(timeline.row_count(), 4);
        assert!(timeline.to_string().contains("idle"));
    }
}
