pub mod fee_collector;
