/// Tile codes of the reference maze, row-major, 31 rows by 32 columns.
#[rustfmt::skip]
pub const REFERENCE_LAYOUT: [[u8; 32]; 31] = [
    [ 3,  3,  1, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10, 43, 42, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10,  0,  3,  3],
    [ 3,  3,  3, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 25, 24, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 23, 14, 14, 22, 45, 23, 14, 14, 14, 22, 45, 25, 24, 45, 23, 14, 14, 14, 22, 45, 23, 14, 14, 22, 45,  2,  3,  3],
    [ 3,  3,  3, 47, 25, 44, 44, 24, 45, 25, 44, 44, 44, 24, 45, 25, 24, 45, 25, 44, 44, 44, 24, 45, 25, 44, 44, 24, 47,  2,  3,  3],
    [ 3,  3,  3, 45, 27, 20, 20, 26, 45, 27, 20, 20, 20, 26, 45, 27, 26, 45, 27, 20, 20, 20, 26, 45, 27, 20, 20, 26, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 23, 14, 14, 22, 45, 23, 22, 45, 23, 14, 14, 14, 14, 14, 14, 22, 45, 23, 22, 45, 23, 14, 14, 22, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 27, 20, 20, 26, 45, 25, 24, 45, 27, 20, 20, 35, 34, 20, 20, 26, 45, 25, 24, 45, 27, 20, 20, 26, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 45, 45, 45, 45, 45, 25, 24, 45, 45, 45, 45, 25, 24, 45, 45, 45, 45, 25, 24, 45, 45, 45, 45, 45, 45,  2,  3,  3],
    [ 3,  3,  5, 12, 12, 12, 12, 22, 45, 25, 27, 14, 14, 22, 44, 25, 24, 44, 23, 14, 14, 26, 24, 45, 23, 12, 12, 12, 12,  4,  3,  3],
    [ 3,  3, 44, 44, 44, 44, 44,  3, 45, 25, 34, 20, 20, 26, 44, 27, 26, 44, 27, 20, 20, 35, 24, 45,  2, 44, 44, 44, 44, 44,  3,  3],
    [ 3,  3, 44, 44, 44, 44, 44,  3, 45, 25, 24, 44, 44, 44, 44, 44, 44, 44, 44, 44, 44, 25, 24, 45,  2, 44, 44, 44, 44, 44,  3,  3],
    [ 3,  3, 44, 44, 44, 44, 44,  3, 45, 25, 24, 44, 29, 12, 33, 44, 44, 32, 12, 28, 44, 25, 24, 45,  2, 44, 44, 44, 44, 44,  3,  3],
    [ 3,  3, 10, 10, 10, 10, 10, 26, 45, 27, 26, 44,  2, 44, 44, 44, 44, 44, 44,  3, 44, 27, 26, 45, 27, 10, 10, 10, 10, 10,  3,  3],
    [44, 44, 44, 44, 44, 44, 44, 44, 45, 44, 44, 44,  2, 44, 44, 44, 44, 44, 44,  3, 44, 44, 44, 45, 44, 44, 44, 44, 44, 44, 44, 44],
    [ 3,  3, 12, 12, 12, 12, 12, 22, 45, 23, 22, 44,  2, 44, 44, 44, 44, 44, 44,  3, 44, 23, 22, 45, 23, 12, 12, 12, 12, 12,  3,  3],
    [ 3,  3, 44, 44, 44, 44, 44,  3, 45, 25, 24, 44, 31, 10, 10, 10, 10, 10, 10, 30, 44, 25, 24, 45,  2, 44, 44, 44, 44, 44,  3,  3],
    [ 3,  3, 44, 44, 44, 44, 44,  3, 45, 25, 24, 44, 44, 44, 44, 44, 44, 44, 44, 44, 44, 25, 24, 45,  2, 44, 44, 44, 44, 44,  3,  3],
    [ 3,  3, 44, 44, 44, 44, 44,  3, 45, 25, 24, 44, 23, 14, 14, 14, 14, 14, 14, 22, 44, 25, 24, 45,  2, 44, 44, 44, 44, 44,  3,  3],
    [ 3,  3,  1, 10, 10, 10, 10, 26, 45, 27, 26, 44, 27, 20, 20, 35, 34, 20, 20, 26, 44, 27, 26, 45, 27, 10, 10, 10, 10,  0,  3,  3],
    [ 3,  3,  3, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 25, 24, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 23, 14, 14, 22, 45, 23, 14, 14, 14, 22, 45, 25, 24, 45, 23, 14, 14, 14, 22, 45, 23, 14, 14, 22, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 27, 21, 35, 24, 45, 27, 20, 20, 20, 26, 45, 27, 26, 45, 27, 20, 20, 20, 26, 45, 25, 34, 20, 26, 45,  2,  3,  3],
    [ 3,  3,  3, 47, 45, 45, 25, 24, 45, 45, 45, 45, 45, 45, 45, 44, 44, 45, 45, 45, 45, 45, 45, 45, 25, 24, 45, 45, 47,  2,  3,  3],
    [ 3,  3,  7, 14, 22, 45, 25, 24, 45, 23, 22, 45, 23, 14, 14, 14, 14, 14, 14, 22, 45, 23, 22, 45, 25, 24, 45, 23, 14,  6,  3,  3],
    [ 3,  3,  9, 20, 26, 45, 27, 26, 45, 25, 24, 45, 27, 20, 20, 35, 34, 20, 20, 40, 45, 25, 24, 45, 27, 26, 45, 27, 20,  8,  3,  3],
    [ 3,  3,  3, 45, 45, 45, 45, 45, 45, 25, 24, 45, 45, 45, 45, 25, 24, 45, 45, 45, 45, 25, 24, 45, 45, 45, 45, 45, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 23, 14, 14, 14, 14, 37, 36, 14, 14, 22, 45, 25, 24, 45, 23, 14, 14, 37, 36, 14, 14, 14, 14, 38, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 27, 20, 20, 20, 20, 20, 20, 20, 20, 26, 45, 27, 26, 45, 27, 20, 20, 20, 20, 20, 20, 20, 20, 26, 45,  2,  3,  3],
    [ 3,  3,  3, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45, 45,  2,  3,  3],
    [ 3,  3,  5, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12,  4,  3,  3],
];
