//! # chunk_pool - Alocador de Memória em Slabs Fragmentados
//!
//! Biblioteca de alocação por slabs fragmentados ("chunked"), com
//! alocação e liberação amortizadas O(1) para objetos de tipo fixo ou
//! misto, armazenamento com endereço estável e testes de pertencimento
//! O(1).
//!
//! ## Componentes
//! - **IndexSet**: conjunto de índices intrusivo em lista duplamente
//!   ligada sobre um espaço de índices limitado — a primitiva de
//!   rastreamento livre/ocupado sobre a qual tudo mais é construído.
//! - **Chunk**: um bloco de memória bruto e alinhado, fatiado em slots de
//!   tamanho fixo.
//! - **SlabPool**: uma coleção de chunks que cresce, para um tamanho de
//!   slot, roteando alocações para o primeiro chunk com slot livre.
//! - **ItemPool**: container de valores com índice denso e índices
//!   estáveis e reciclados.
//! - **TypedPool<T>**: um `SlabPool` especializado para um tipo único em
//!   tempo de compilação.
//! - **DynamicPool**: despacho de tipo em tempo de execução entre
//!   `SlabPool`s por tipo, capaz de destruir e liberar um objeto a partir
//!   de apenas um ponteiro sem tipo.
//!
//! Esta biblioteca é single-threaded: nenhum tipo aqui é `Send` ou `Sync`,
//! e nenhuma operação sincroniza com nada fora da thread chamadora.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use chunk_pool::memory::{DynamicPool, TypedPool};
//!
//! struct Particle {
//!     x: f32,
//!     y: f32,
//! }
//!
//! // Um pool especializado para um único tipo em tempo de compilação.
//! let mut particles: TypedPool<Particle> = TypedPool::new(256);
//! let p = particles.create(Particle { x: 0.0, y: 0.0 }).unwrap();
//! assert!(particles.destroy(p));
//!
//! // Um pool que despacha pela identidade de tipo em tempo de execução.
//! let mut dynamic = DynamicPool::default();
//! let ptr = dynamic.create(Particle { x: 1.0, y: 2.0 }).unwrap();
//! assert!(dynamic.contains_typed(ptr.as_ptr()));
//! assert!(dynamic.destroy(ptr));
//! ```

pub mod memory;

pub use memory::{Chunk, DynamicPool, IndexSet, ItemPool, SlabPool, TypedPool};
