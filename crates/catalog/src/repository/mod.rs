mod product;

pub use self::product::DocumentProductRepository;
