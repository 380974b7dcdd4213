// Library root: 통합 테스트에서 사용하는 공개 모듈 트리
// Public module tree, also consumed by the integration tests
pub mod domains;
pub mod routes;
pub mod shared;
