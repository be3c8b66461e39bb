/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Unbounded coordinates, may point outside the board before wrapping.
pub type SignedCoord2 = (isize, isize);

/// Neighborhood offset `(row_offset, col_offset)`.
pub type Delta = (isize, isize);

/// Signed sum of neighboring hazard values.
pub type Clue = i32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Narrows `coords` back to board coordinates, returning a value only when it is in bounds.
pub fn clamp_to_board((row, col): SignedCoord2, (rows, cols): Coord2) -> Option<Coord2> {
    let row = Coord::try_from(row).ok()?;
    let col = Coord::try_from(col).ok()?;
    (row < rows && col < cols).then_some((row, col))
}
