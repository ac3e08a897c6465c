use hashigene::{BoardView, Cell};
use ndarray::Array2;

fn glyph(cell: &Cell) -> char {
    match cell.code() {
        value @ 1..=8 => char::from(b'0' + value as u8),
        -1 => '|',
        -2 => 'H',
        -3 => '-',
        -4 => '=',
        _ => '.',
    }
}

/// Draw a grid in the puzzle file format, one line per row.
pub fn render_cells(cells: &Array2<Cell>) -> String {
    let mut out = String::with_capacity(cells.len() + cells.nrows());
    for row in cells.rows() {
        out.extend(row.iter().map(glyph));
        out.push('\n');
    }
    out
}

/// One line per island still short of or over its value.
pub fn render_incomplete(view: &BoardView) -> String {
    view.islands.iter()
        .filter(|island| !island.complete)
        .map(|island| format!("island {} at {} (value {}) is not satisfied\n", island.id, island.location, island.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use hashigene::Cell;
    use ndarray::array;

    use super::render_cells;

    #[test]
    fn draws_every_cell_kind() {
        let cells = array![
            [2, -4, 2],
            [-1, 0, -2],
            [1, -3, 1],
        ].map(|code| Cell::from_code(*code).unwrap());

        assert_eq!(render_cells(&cells), "2=2\n|.H\n1-1\n");
    }
}
