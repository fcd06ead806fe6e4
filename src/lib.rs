//! 組ぼーど（回覧板）Webアプリケーションライブラリ
//! 共有型とルーティングを提供する

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod views;
