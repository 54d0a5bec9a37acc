//! The 1980 IAU nutation terms (Meeus Table 22.A).

/// Nutation amplitudes: longitude (sin) and obliquity (cos), each constant plus T-rate,
/// in units of 0.0001 arcseconds.
pub(crate) const NUTATION_AMPLITUDES: [[f64; 4]; 63] = [
    [-171996.0, -174.2, 92025.0, 8.9],
    [-13187.0, -1.6, 5736.0, -3.1],
    [-2274.0, -0.2, 977.0, -0.5],
    [2062.0, 0.2, -895.0, 0.5],
    [1426.0, -3.4, 54.0, -0.1],
    [712.0, 0.1, -7.0, 0.0],
    [-517.0, 1.2, 224.0, -0.6],
    [-386.0, -0.4, 200.0, 0.0],
    [-301.0, 0.0, 129.0, -0.1],
    [217.0, -0.5, -95.0, 0.3],
    [-158.0, 0.0, 0.0, 0.0],
    [129.0, 0.1, -70.0, 0.0],
    [123.0, 0.0, -53.0, 0.0],
    [63.0, 0.0, 0.0, 0.0],
    [63.0, 0.1, -33.0, 0.0],
    [-59.0, 0.0, 26.0, 0.0],
    [-58.0, -0.1, 32.0, 0.0],
    [-51.0, 0.0, 27.0, 0.0],
    [48.0, 0.0, 0.0, 0.0],
    [46.0, 0.0, -24.0, 0.0],
    [-38.0, 0.0, 16.0, 0.0],
    [-31.0, 0.0, 13.0, 0.0],
    [29.0, 0.0, 0.0, 0.0],
    [29.0, 0.0, -12.0, 0.0],
    [26.0, 0.0, 0.0, 0.0],
    [-22.0, 0.0, 0.0, 0.0],
    [21.0, 0.0, -10.0, 0.0],
    [17.0, -0.1, 0.0, 0.0],
    [16.0, 0.0, -8.0, 0.0],
    [-16.0, 0.1, 7.0, 0.0],
    [-15.0, 0.0, 9.0, 0.0],
    [-13.0, 0.0, 7.0, 0.0],
    [-12.0, 0.0, 6.0, 0.0],
    [11.0, 0.0, 0.0, 0.0],
    [-10.0, 0.0, 5.0, 0.0],
    [-8.0, 0.0, 3.0, 0.0],
    [7.0, 0.0, -3.0, 0.0],
    [-7.0, 0.0, 0.0, 0.0],
    [-7.0, 0.0, 3.0, 0.0],
    [-7.0, 0.0, 3.0, 0.0],
    [6.0, 0.0, 0.0, 0.0],
    [6.0, 0.0, -3.0, 0.0],
    [6.0, 0.0, -3.0, 0.0],
    [-6.0, 0.0, 3.0, 0.0],
    [-6.0, 0.0, 3.0, 0.0],
    [5.0, 0.0, 0.0, 0.0],
    [-5.0, 0.0, 3.0, 0.0],
    [-5.0, 0.0, 3.0, 0.0],
    [-5.0, 0.0, 3.0, 0.0],
    [4.0, 0.0, 0.0, 0.0],
    [4.0, 0.0, 0.0, 0.0],
    [4.0, 0.0, 0.0, 0.0],
    [-4.0, 0.0, 0.0, 0.0],
    [-4.0, 0.0, 0.0, 0.0],
    [-4.0, 0.0, 0.0, 0.0],
    [3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
    [-3.0, 0.0, 0.0, 0.0],
];

/// Multipliers of the fundamental arguments D, M, M', F and Omega for each nutation term.
pub(crate) const NUTATION_ARGUMENTS: [[f64; 5]; 63] = [
    [0.0, 0.0, 0.0, 0.0, 1.0],
    [-2.0, 0.0, 0.0, 2.0, 2.0],
    [0.0, 0.0, 0.0, 2.0, 2.0],
    [0.0, 0.0, 0.0, 0.0, 2.0],
    [0.0, 1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0, 0.0],
    [-2.0, 1.0, 0.0, 2.0, 2.0],
    [0.0, 0.0, 0.0, 2.0, 1.0],
    [0.0, 0.0, 1.0, 2.0, 2.0],
    [-2.0, -1.0, 0.0, 2.0, 2.0],
    [-2.0, 0.0, 1.0, 0.0, 0.0],
    [-2.0, 0.0, 0.0, 2.0, 1.0],
    [0.0, 0.0, -1.0, 2.0, 2.0],
    [2.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0, 1.0],
    [2.0, 0.0, -1.0, 2.0, 2.0],
    [0.0, 0.0, -1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 2.0, 1.0],
    [-2.0, 0.0, 2.0, 0.0, 0.0],
    [0.0, 0.0, -2.0, 2.0, 1.0],
    [2.0, 0.0, 0.0, 2.0, 2.0],
    [0.0, 0.0, 2.0, 2.0, 2.0],
    [0.0, 0.0, 2.0, 0.0, 0.0],
    [-2.0, 0.0, 1.0, 2.0, 2.0],
    [0.0, 0.0, 0.0, 2.0, 0.0],
    [-2.0, 0.0, 0.0, 2.0, 0.0],
    [0.0, 0.0, -1.0, 2.0, 1.0],
    [0.0, 2.0, 0.0, 0.0, 0.0],
    [2.0, 0.0, -1.0, 0.0, 1.0],
    [-2.0, 2.0, 0.0, 2.0, 2.0],
    [0.0, 1.0, 0.0, 0.0, 1.0],
    [-2.0, 0.0, 1.0, 0.0, 1.0],
    [0.0, -1.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, 2.0, -2.0, 0.0],
    [2.0, 0.0, -1.0, 2.0, 1.0],
    [2.0, 0.0, 1.0, 2.0, 2.0],
    [0.0, 1.0, 0.0, 2.0, 2.0],
    [-2.0, 1.0, 1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0, 2.0, 2.0],
    [2.0, 0.0, 0.0, 2.0, 1.0],
    [2.0, 0.0, 1.0, 0.0, 0.0],
    [-2.0, 0.0, 2.0, 2.0, 2.0],
    [-2.0, 0.0, 1.0, 2.0, 1.0],
    [2.0, 0.0, -2.0, 0.0, 1.0],
    [2.0, 0.0, 0.0, 0.0, 1.0],
    [0.0, -1.0, 1.0, 0.0, 0.0],
    [-2.0, -1.0, 0.0, 2.0, 1.0],
    [-2.0, 0.0, 0.0, 0.0, 1.0],
    [0.0, 0.0, 2.0, 2.0, 1.0],
    [-2.0, 0.0, 2.0, 0.0, 1.0],
    [-2.0, 1.0, 0.0, 2.0, 1.0],
    [0.0, 0.0, 1.0, -2.0, 0.0],
    [-1.0, 0.0, 1.0, 0.0, 0.0],
    [-2.0, 1.0, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 2.0, 0.0],
    [0.0, 0.0, -2.0, 2.0, 2.0],
    [-1.0, -1.0, 1.0, 0.0, 0.0],
    [0.0, 1.0, 1.0, 0.0, 0.0],
    [0.0, -1.0, 1.0, 2.0, 2.0],
    [2.0, -1.0, -1.0, 2.0, 2.0],
    [0.0, 0.0, 3.0, 2.0, 2.0],
    [2.0, -1.0, 0.0, 2.0, 2.0],
];
