pub mod config_dto;
pub mod dag_dto;
