pub mod angles;
pub mod constants;
pub mod differences;
pub mod kepler;
pub mod keplerian_element;
pub mod observers;
pub mod orb_elem;
pub mod propagation;
pub mod records;
pub mod ref_system;
pub mod sim_errors;
pub mod sim_params;
pub mod simulator;
pub mod state;
pub mod time;
pub mod visibility;
