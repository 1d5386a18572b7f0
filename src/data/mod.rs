/// Data layer: loading, shaping and comparing the plotted values.
///
/// Architecture:
/// ```text
///  data.csv   training_data.csv   prediction.csv
///      │              │                  │
///      ▼              ▼                  ▼
///   ┌──────────┐
///   │  loader   │  parse files → NumericTable × 3
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  X, Y, Z actual, Z predicted → PlotData
///   └──────────┘
///        │  (x, y)
///        ▼
///   ┌───────────────┐
///   │ triangulation  │  Delaunay mesh shared by both surfaces
///   └───────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod stats;
pub mod triangulation;
