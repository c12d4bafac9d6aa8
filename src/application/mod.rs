// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case coordinates the other layers for one user
// action:
//
//   generate_use_case — generate & reset the observation table
//   explore_use_case  — first rows + usage averages
//   train_use_case    — train, select, persist model and report
//   predict_use_case  — headcount for one day's features
//
// Rules for this layer:
//   - No model math here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - Storage paths always come from a StorageLocation
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

pub mod generate_use_case;

pub mod explore_use_case;

pub mod train_use_case;

pub mod predict_use_case;
